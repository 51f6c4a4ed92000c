use chrono::Local;

use crate::timetable::{Assignment, AssignmentKey, AssignmentStore, Grid};

/// Download name offered for the exported document
pub const EXPORT_FILENAME: &str = "my-timetable.html";

/// Fixed stylesheet embedded in every export so the document stands alone
const EXPORT_STYLES: &str = r#"    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: 'Inter', sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; color: #333; }
    .container { max-width: 1200px; margin: 0 auto; padding: 20px; }
    .header { text-align: center; margin-bottom: 40px; color: white; }
    .header h1 { font-size: 3rem; font-weight: 800; margin-bottom: 10px; }
    .timetable-container { background: rgba(255, 255, 255, 0.95); border-radius: 25px; padding: 35px; box-shadow: 0 25px 50px rgba(0,0,0,0.15); }
    .timetable { width: 100%; border-collapse: collapse; border-radius: 15px; overflow: hidden; }
    .timetable th, .timetable td { padding: 18px 15px; text-align: center; border: 1px solid #e2e8f0; }
    .timetable th { background: linear-gradient(135deg, #667eea, #764ba2); color: white; font-weight: 700; }
    .timetable td { background: white; }
    .time-slot { background: linear-gradient(135deg, #f7fafc, #edf2f7) !important; font-weight: 700; color: #4a5568; }
    .subject-entry { font-weight: 600; border-left: 4px solid transparent; }
    .subject-entry.blue { background: linear-gradient(135deg, #e6f3ff, #cce7ff) !important; border-left-color: #3182ce; color: #2c5282; }
    .subject-entry.green { background: linear-gradient(135deg, #e6fffa, #b2f5ea) !important; border-left-color: #38a169; color: #234e52; }
    .subject-entry.purple { background: linear-gradient(135deg, #f7e6ff, #e9d5ff) !important; border-left-color: #805ad5; color: #553c9a; }
    .subject-entry.orange { background: linear-gradient(135deg, #fff5e6, #fed7aa) !important; border-left-color: #dd6b20; color: #9c4221; }
    .subject-entry.red { background: linear-gradient(135deg, #ffe6e6, #feb2b2) !important; border-left-color: #e53e3e; color: #9b2c2c; }
    .subject-entry.teal { background: linear-gradient(135deg, #e6fffa, #b2f5ea) !important; border-left-color: #319795; color: #234e52; }
    .subject-name { font-size: 1.1rem; font-weight: 700; margin-bottom: 4px; }
    .subject-details { font-size: 0.85rem; opacity: 0.8; }
    .empty-slot { color: #a0aec0; font-style: italic; }
    @media print { body { background: white !important; } .timetable-container { box-shadow: none; border: 1px solid #ddd; } }"#;

/// Escapes user-entered text for HTML element content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_assignment_cell(assignment: &Assignment) -> String {
    let mut details = Vec::new();
    if let Some(teacher) = &assignment.teacher {
        details.push(escape_html(teacher));
    }
    if let Some(room) = &assignment.room {
        details.push(format!("Room: {}", escape_html(room)));
    }

    let mut cell = format!(
        "<td class=\"subject-entry {}\"><div class=\"subject-name\">{}</div>",
        assignment.color.css_class(),
        escape_html(&assignment.subject)
    );
    if !details.is_empty() {
        cell.push_str(&format!(
            "<div class=\"subject-details\">{}</div>",
            details.join("<br>")
        ));
    }
    cell.push_str("</td>");
    cell
}

/// Serializes the grid plus its assignments into a single self-contained
/// styled document, ready to be offered as a download
pub fn export_html(grid: &Grid, store: &AssignmentStore) -> String {
    let date = Local::now().format("%Y-%m-%d").to_string();

    let mut table = String::from("<table class=\"timetable\"><thead><tr><th>Time</th>");
    for day in &grid.days {
        table.push_str(&format!("<th>{}</th>", day));
    }
    table.push_str("</tr></thead><tbody>");

    for slot in &grid.slots {
        table.push_str(&format!(
            "<tr><td class=\"time-slot\"><strong>{}</strong><br><small>{}</small></td>",
            slot.start, slot.end
        ));
        for &day in &grid.days {
            match store.lookup(&AssignmentKey::new(day, slot.start.clone())) {
                Some(assignment) => table.push_str(&render_assignment_cell(assignment)),
                None => table.push_str("<td class=\"empty-slot\"></td>"),
            }
        }
        table.push_str("</tr>");
    }
    table.push_str("</tbody></table>");

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>My Timetable - Generated on {date}</title>\n\
         <style>\n{EXPORT_STYLES}\n</style>\n\
         </head>\n<body>\n\
         <div class=\"container\">\n\
         <div class=\"header\"><h1>My Timetable</h1><p>Generated on {date}</p></div>\n\
         <div class=\"timetable-container\">{table}</div>\n\
         </div>\n</body>\n</html>\n"
    )
}
