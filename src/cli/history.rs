use super::ui;
use crate::core::ConversionHistory;
use comfy_table::Cell;

impl ConversionHistory {
    pub fn display_as_table(&self) -> String {
        if self.is_empty() {
            return ui::style_text("No conversions yet.", ui::StyleType::Subtle);
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("#"),
            ui::header_cell("Amount"),
            ui::header_cell("From"),
            ui::header_cell("Result"),
            ui::header_cell("To"),
        ]);

        // Numbered so the newest conversion carries the highest number
        let total = self.len();
        for (index, record) in self.list().enumerate() {
            table.add_row(vec![
                ui::number_cell(&(total - index).to_string()),
                ui::number_cell(&record.amount.to_string()),
                Cell::new(record.source.as_str()),
                ui::number_cell(&record.result),
                Cell::new(record.target.as_str()),
            ]);
        }

        format!(
            "{}\n\n{}",
            ui::style_text("Conversion History", ui::StyleType::Title),
            table
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{ConversionHistory, ConversionRecord};

    #[test]
    fn test_history_table_lists_newest_first() {
        let mut history = ConversionHistory::new();
        for (amount, result) in [(1.0, "0.90"), (2.0, "1.80")] {
            history.record(ConversionRecord {
                amount,
                source: "USD".parse().unwrap(),
                target: "EUR".parse().unwrap(),
                result: result.to_string(),
            });
        }

        let output = history.display_as_table();
        let newest = output.find("1.80").unwrap();
        let oldest = output.find("0.90").unwrap();
        assert!(newest < oldest);
        assert!(output.contains("Conversion History"));
    }

    #[test]
    fn test_empty_history() {
        let output = ConversionHistory::new().display_as_table();
        assert!(output.contains("No conversions yet."));
    }
}
