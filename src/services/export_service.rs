use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_xlsxwriter::*;

use crate::error::{Error, Result};
use crate::models::interview::InterviewRecord;
use crate::services::closure_service::closure_time;

pub const CSV_FILENAME: &str = "interviews.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const XLSX_FILENAME: &str = "interviews.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const CSV_HEADERS: [&str; 6] = [
    "Candidate Name",
    "Position Applied",
    "Interview Date",
    "Status",
    "Closure Time",
    "Notes",
];

pub struct ExportService;

impl ExportService {
    /// Wraps a text cell in double quotes, doubling any quote inside it.
    fn quote(value: &str) -> String {
        format!("\"{}\"", value.replace('"', "\"\""))
    }

    fn date_cell(record: &InterviewRecord) -> String {
        record
            .interview_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn status_cell(record: &InterviewRecord) -> &'static str {
        record.status.map(|status| status.label()).unwrap_or_default()
    }
}

impl ExportService {
    /// Render the view as CSV, rows in the order given. Text columns are
    /// quoted; date and status are written bare.
    pub fn generate_interviews_csv(records: &[&InterviewRecord], now: DateTime<Utc>) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADERS)?;
        for record in records {
            writer.write_record([
                Self::quote(record.name_text()),
                Self::quote(record.position_text()),
                Self::date_cell(record),
                Self::status_cell(record).to_string(),
                Self::quote(&closure_time(record, now).to_string()),
                Self::quote(record.notes_text()),
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes).map_err(|e| Error::Internal(format!("CSV is not UTF-8: {}", e)))
    }

    /// Generate a styled XLSX workbook with the same columns as the CSV.
    pub fn generate_interviews_xlsx(records: &[&InterviewRecord], now: DateTime<Utc>) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Interviews")?;

        // ── Color palette ──
        let primary_color = Color::RGB(0x1C398E);
        let header_bg = Color::RGB(0x0F2A5C);
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);

        let widths = [30.0, 32.0, 16.0, 16.0, 14.0, 60.0];
        for (i, width) in widths.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }
        let last_col = (CSV_HEADERS.len() - 1) as u16;

        // ── Title row ──
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 36)?;
        worksheet.merge_range(0, 0, 0, last_col, "Interview Tracker", &title_format)?;

        // ── Subtitle row ──
        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0xCBD5E1))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(1, 22)?;
        let subtitle = format!(
            "Exported: {}  •  Interviews: {}",
            now.format("%Y-%m-%d %H:%M UTC"),
            records.len()
        );
        worksheet.merge_range(1, 0, 1, last_col, &subtitle, &subtitle_format)?;

        // ── Header row ──
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let header_row = 2;
        worksheet.set_row_height(header_row, 26)?;
        for (i, name) in CSV_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        // ── Data rows ──
        let data_start_row = 3;
        for (idx, record) in records.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.write_string_with_format(row, 0, record.name_text(), &base_fmt.clone().set_bold())?;
            worksheet.write_string_with_format(row, 1, record.position_text(), &base_fmt)?;
            worksheet.write_string_with_format(row, 2, &Self::date_cell(record), &center_fmt)?;

            let status_fmt = match record.status {
                Some(status) => Format::new()
                    .set_font_size(10)
                    .set_bold()
                    .set_font_color(Color::White)
                    .set_background_color(Color::RGB(status.badge_color()))
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_border(FormatBorder::Thin)
                    .set_border_color(border_color),
                None => center_fmt.clone(),
            };
            worksheet.write_string_with_format(row, 3, Self::status_cell(record), &status_fmt)?;

            let closure = closure_time(record, now).to_string();
            worksheet.write_string_with_format(row, 4, &closure, &center_fmt)?;
            worksheet.write_string_with_format(row, 5, record.notes_text(), &wrap_fmt)?;
        }

        worksheet.set_freeze_panes(3, 0)?;
        let last_row = (data_start_row + records.len() as u32).saturating_sub(1).max(header_row);
        worksheet.autofilter(header_row, 0, last_row, last_col)?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
