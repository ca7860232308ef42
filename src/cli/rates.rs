use super::{convert, ui};
use crate::core::{BASE_CURRENCY, CurrencyCode, RateTable, Session};
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Renders the selectable currencies' rates against the base currency.
pub fn display_rates(table: &RateTable) -> String {
    let mut output = ui::new_styled_table();
    output.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {BASE_CURRENCY}")),
    ]);

    for code in CurrencyCode::supported() {
        output.add_row(vec![
            Cell::new(code.as_str()),
            ui::format_optional_cell(table.rate(&code).ok(), |r| format!("{r:.4}")),
        ]);
    }

    let as_of = table
        .date()
        .map_or("unknown date".to_string(), |d| d.format("%Y-%m-%d").to_string());
    format!(
        "{}\n\n{}",
        ui::style_text(&format!("Exchange rates as of {as_of}"), ui::StyleType::Title),
        output
    )
}

pub async fn run(session: &mut Session) -> Result<()> {
    convert::load_rates(session)
        .await
        .context("Could not load exchange rates")?;
    println!("{}", display_rates(&session.rates()));
    Ok(())
}
