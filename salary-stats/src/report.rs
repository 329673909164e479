use crate::LanguageStat;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};

const AVERAGE_SALARY_COLUMN: usize = 3;

/// Render one source's stats as a titled, bordered table. The average
/// salary column is right-justified, the rest keep the default alignment.
pub fn stats_table(title: &str, stats: &[(String, LanguageStat)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Язык программирования",
        "Вакансий найдено",
        "Вакансий обработано",
        "Средняя зарплата",
    ]);
    for (language, stat) in stats {
        table.add_row(vec![
            language.clone(),
            stat.vacancies_found.to_string(),
            stat.vacancies_processed.to_string(),
            stat.average_salary.to_string(),
        ]);
    }
    if let Some(column) = table.column_mut(AVERAGE_SALARY_COLUMN) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    format!("{}\n{}", title, table)
}
