//! Render a card for a small hard-coded flow and brief.
//!
//! Run with: cargo run --example render_card

use std::path::Path;

use flowcard::{compose, Brief, Flow};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let flow: Flow = serde_json::from_str(
        r##"{
            "name": "Widget checkout",
            "steps": [
                {"type": "CHAPTER", "theme": "dark", "textAlign": "left"},
                {"hotspots": [{"bgColor": "#0055cc", "textColor": "#ffffff"}]},
                {"paths": [{"buttonColor": "#0055cc"}]}
            ]
        }"##,
    )?;

    let brief = Brief {
        overlay: "Buy a Widget".to_string(),
        elements: vec![
            "Search the catalog".to_string(),
            "Open the product page".to_string(),
            "Complete checkout".to_string(),
        ],
    };

    let out = Path::new("social.png");
    compose(&brief, out, Some(&flow), None)?;
    println!("wrote {}", out.display());
    Ok(())
}
