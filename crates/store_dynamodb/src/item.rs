use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Convert a DynamoDB item into plain JSON.
///
/// DynamoDB numbers are arbitrary-precision decimals; values with no
/// fractional part read back as integers, everything else as a float. The
/// conversion recurses into lists and maps.
pub fn item_to_value(item: &HashMap<String, AttributeValue>) -> Value {
    Value::Object(
        item.iter()
            .map(|(field, attribute)| (field.clone(), attribute_to_value(attribute)))
            .collect(),
    )
}

fn attribute_to_value(attribute: &AttributeValue) -> Value {
    match attribute {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(number) => number_to_value(number),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(entries) => {
            Value::Array(entries.iter().map(attribute_to_value).collect())
        }
        AttributeValue::M(fields) => Value::Object(
            fields
                .iter()
                .map(|(field, attribute)| (field.clone(), attribute_to_value(attribute)))
                .collect(),
        ),
        AttributeValue::Ss(entries) => {
            Value::Array(entries.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(entries) => Value::Array(
            entries
                .iter()
                .map(|number| number_to_value(number))
                .collect(),
        ),
        // Binary and unrecognised attributes have no JSON rendering
        _ => Value::Null,
    }
}

fn number_to_value(text: &str) -> Value {
    if let Ok(integer) = text.parse::<i64>() {
        return Value::Number(Number::from(integer));
    }

    match text.parse::<f64>() {
        // Exact values such as "5.0" still read back as integers
        Ok(float) if float.fract() == 0.0 && float.abs() <= i64::MAX as f64 => {
            Value::Number(Number::from(float as i64))
        }
        Ok(float) => Number::from_f64(float).map_or(Value::Null, Value::Number),
        Err(_) => Value::String(text.to_string()),
    }
}
