use serde_json::json;
use tfs_frame::{from_str, DataFrame, DataType, ScalarValue};

#[test]
fn test_frame_json_roundtrip() {
    let text = "@ Q1 %le 62.31\n@ N %d 3\n* NAME S\n$ %s %le\nIP1 0\nIP5 13329.3\n";
    let df = from_str(text).unwrap();
    let json = serde_json::to_string(&df).unwrap();
    let back: DataFrame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, df);
    assert_eq!(back.column_position("S"), Ok(1));
}

#[test]
fn test_frame_json_shape() {
    let df = from_str("@ N %d 3\n* S\n$ %le\n1.5\n").unwrap();
    let value = serde_json::to_value(&df).unwrap();
    assert_eq!(
        value,
        json!({
            "properties": [{ "name": "N", "value": { "Int": 3 } }],
            "columns": [{ "name": "S", "data": { "Float": [1.5] } }],
        })
    );
}

#[test]
fn test_ragged_json_rejected() {
    let value = json!({
        "columns": [
            { "name": "A", "data": { "Float": [1.0, 2.0] } },
            { "name": "B", "data": { "String": ["x"] } },
        ],
    });
    let result: Result<DataFrame, _> = serde_json::from_value(value);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("Length mismatch in column B"), "{err}");
}

#[test]
fn test_scalar_and_type_serde() {
    let value: ScalarValue = serde_json::from_str(r#"{"String":"\"LHCB1\""}"#).unwrap();
    assert_eq!(value.as_str(), Ok("\"LHCB1\""));
    assert_eq!(serde_json::to_string(&DataType::Complex).unwrap(), r#""Complex""#);
}
