//! Fixture builders for end-to-end loads in temporary directories.

use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;

use crate::config::PipelineConfig;

pub const ENVIRONMENT_HEADER: &str = " Time , Temperature, Humidity ,pH,EC ";

pub const GROWTH_HEADER: [&str; 5] = ["개체번호", "잎 수", "지상부 길이(mm)", "지하부 길이(mm)", "생중량 (g)"];

/// Writes `rows` environment samples for `group` to `{group}_환경데이터.csv`.
pub fn write_environment_csv(dir: &Path, group: &str, rows: usize) {
    write_environment_file(dir, &format!("{}_환경데이터.csv", group), ENVIRONMENT_HEADER, rows);
}

pub fn write_environment_file(dir: &Path, file_name: &str, header: &str, rows: usize) {
    let mut content = format!("{}\n", header);
    let columns = header.split(',').count();
    for i in 0..rows {
        let values = [
            format!("2025-05-{:02} 09:00:00", i + 1),
            format!("{:.1}", 20.0 + i as f64),
            format!("{}", 55 + i),
            "6.2".to_string(),
            "1.1".to_string(),
        ];
        content.push_str(&values[..columns.min(values.len())].join(","));
        content.push('\n');
    }
    fs::write(dir.join(file_name), content).unwrap();
}

/// Writes one environment file per configured group.
pub fn write_all_environment(dir: &Path, config: &PipelineConfig, rows: usize) {
    for group in &config.groups {
        write_environment_csv(dir, &group.name, rows);
    }
}

/// Workbook with one sheet per `(sheet name, specimen count)` pair, Korean headers.
pub fn write_growth_workbook(path: &Path, sheets: &[(&str, usize)]) {
    let mut workbook = Workbook::new();
    for (name, specimens) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (col, header) in GROWTH_HEADER.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for i in 0..*specimens {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, (i + 1) as f64).unwrap();
            worksheet.write_number(row, 1, 5.0 + i as f64).unwrap();
            worksheet.write_number(row, 2, 40.0 + i as f64).unwrap();
            worksheet.write_number(row, 3, 60.0).unwrap();
            worksheet.write_number(row, 4, 2.5).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

/// The default growth workbook: one sheet per configured group named exactly after it.
pub fn write_default_workbook(dir: &Path, config: &PipelineConfig, specimens: usize) {
    let sheets: Vec<(&str, usize)> = config
        .groups
        .iter()
        .map(|g| (g.name.as_str(), specimens))
        .collect();
    write_growth_workbook(&dir.join("4개교_생육결과데이터.xlsx"), &sheets);
}
