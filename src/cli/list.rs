use super::ui;
use crate::core::{CurrencyList, CurrencyListProvider};
use anyhow::Result;
use comfy_table::Cell;

impl CurrencyList {
    /// Renders the currencies matching `query` as a table.
    pub fn display_as_table(&self, query: &str) -> String {
        let codes = self.filter(query);
        if codes.is_empty() {
            return ui::style_text("No currencies found", ui::StyleType::Subtle);
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
        for &code in &codes {
            table.add_row(vec![
                ui::code_cell(code),
                Cell::new(self.name(code).unwrap_or(code)),
            ]);
        }

        format!(
            "{}\n{}",
            table,
            ui::style_text(
                &format!("{} of {} currencies", codes.len(), self.len()),
                ui::StyleType::Subtle
            )
        )
    }
}

pub async fn run(
    list_provider: &(dyn CurrencyListProvider + Send + Sync),
    search: Option<&str>,
) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies...");
    let currencies = list_provider.fetch_currencies().await;
    pb.finish_and_clear();

    println!("{}", currencies?.display_as_table(search.unwrap_or_default()));
    Ok(())
}
