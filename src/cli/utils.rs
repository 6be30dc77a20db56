use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&success_json(message, data))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

fn success_json(message: &str, data: Option<Value>) -> Value {
    let mut response = json!({
        "success": true,
        "message": message
    });

    if let (Some(Value::Object(extra)), Value::Object(target)) = (data, &mut response) {
        target.extend(extra);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_fields_are_merged_next_to_the_message() {
        let value = success_json("done", Some(json!({ "removed_photos": 3 })));
        assert_eq!(value, json!({ "success": true, "message": "done", "removed_photos": 3 }));
    }

    #[test]
    fn non_object_data_is_ignored() {
        let value = success_json("done", Some(json!([1, 2])));
        assert_eq!(value, json!({ "success": true, "message": "done" }));
    }
}
