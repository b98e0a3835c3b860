//! Symbols command implementation.

use anyhow::Result;
use serde::Serialize;

use knit_chart::Symbol;

/// A legend entry in JSON output.
#[derive(Serialize)]
struct JsonSymbol {
    code: i8,
    name: &'static str,
    glyph: &'static str,
}

/// Execute the symbols command. Transient markers never appear in a chart
/// and are left out.
pub fn cmd_symbols(json: bool) -> Result<()> {
    let legend = Symbol::all().iter().filter(|s| !s.is_transient());

    if json {
        let entries: Vec<JsonSymbol> = legend
            .map(|s| JsonSymbol { code: s.code(), name: s.name(), glyph: s.glyph() })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Chart symbols:");
    for symbol in legend {
        println!("  {:>4}  {:<10} {}", symbol.code(), symbol.name(), symbol.glyph());
    }
    Ok(())
}
