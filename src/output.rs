use crate::api::StatusReport;
use crate::browser::evidence::EvidenceMeta;
use crate::utils::error::Result;
use serde_json::Value;

/// 列表類回應的輸出。--json 時輸出 pretty JSON，
/// 否則平坦物件陣列排成對齊的文字表格。
pub fn print_value(value: &Value, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            println!("{}", render_table(items));
        }
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// 寫入類請求的輸出：預設一行 HTTP 狀態
pub fn print_status(report: &StatusReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("HTTP {} {}", report.status, report.status_text);
    }
    Ok(())
}

pub fn print_fetch(meta: &EvidenceMeta, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(meta)?);
        return Ok(());
    }

    println!("✅ Fetched {}", meta.final_url);
    if !meta.title.is_empty() {
        println!("   title: {}", meta.title);
    }
    println!("📁 Evidence ({})", meta.label);
    println!("   html:       {}", meta.html_path.display());
    println!("   screenshot: {}", meta.screenshot_path.display());
    println!("   metadata:   {}", meta.html_path.with_extension("json").display());
    if meta.logged_out {
        println!("⚠️  Session looks logged out");
    }
    Ok(())
}

fn render_table(items: &[Value]) -> String {
    // 欄位順序以第一次出現為準
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let cell = |value: Option<&Value>| -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    };

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = columns.iter().map(|c| cell(map.get(c))).collect();
            for (i, text) in row.iter().enumerate() {
                widths[i] = widths[i].max(text.chars().count());
            }
            rows.push(row);
        }
    }

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(name, &width)| format!("{:<width$}", name))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&separator.join("  "));

    for row in rows {
        out.push('\n');
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{:<width$}", text))
            .collect();
        out.push_str(line.join("  ").trim_end());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_table_aligns_columns() {
        let items = vec![
            json!({"id": 1, "name": "三菱UFJ銀行", "balance": 150000}),
            json!({"id": 22, "name": "SBI証券", "balance": 3200000}),
        ];

        let table = render_table(&items);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("id"));
        assert!(lines[0].contains("name"));
        assert!(lines[0].contains("balance"));
        assert!(lines[1].chars().all(|c| c == '-' || c == ' '));
        assert!(lines[2].contains("三菱UFJ銀行"));
        assert!(lines[3].contains("3200000"));
    }

    #[test]
    fn test_render_table_unions_columns_in_first_seen_order() {
        let items = vec![
            json!({"id": 1, "name": "a"}),
            json!({"id": 2, "extra": true}),
        ];

        let table = render_table(&items);
        let header = table.lines().next().unwrap();
        let id_pos = header.find("id").unwrap();
        let name_pos = header.find("name").unwrap();
        let extra_pos = header.find("extra").unwrap();
        assert!(id_pos < name_pos && name_pos < extra_pos);
        // missing cells render empty, not "null"
        assert!(!table.contains("null"));
    }
}
