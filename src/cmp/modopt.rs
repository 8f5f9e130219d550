//! Modifier strings of the form `name:key=value:key=value`.

use super::{ParamValue, Params};
use crate::util::{VoxFiltError, VoxFiltResult};

/// Splits a modifier string into a comparator name and its parameters.
///
/// Values parse as an integer, then a float, then a comma-separated float
/// list; anything else is kept as a string. A key without `=value` is an
/// integer flag set to 1.
///
/// ```
/// use voxfilt::cmp::{parse_modifier, ParamValue};
///
/// let (name, params) = parse_modifier("frc:snr=1,0.5").unwrap();
/// assert_eq!(name, "frc");
/// assert_eq!(params.get("snr"), Some(&ParamValue::FloatArray(vec![1.0, 0.5])));
/// ```
pub fn parse_modifier(spec: &str) -> VoxFiltResult<(String, Params)> {
    let mut parts = spec.split(':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(VoxFiltError::invalid_argument(format!(
            "modifier '{spec}' has no name"
        )));
    }
    let mut params = Params::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = match part.split_once('=') {
            Some((key, value)) => (key.trim(), parse_value(value.trim())),
            None => (part, ParamValue::Int(1)),
        };
        if key.is_empty() {
            return Err(VoxFiltError::invalid_argument(format!(
                "modifier '{spec}' has an empty key"
            )));
        }
        params.set(key, value);
    }
    Ok((name.to_string(), params))
}

fn parse_value(raw: &str) -> ParamValue {
    if let Ok(v) = raw.parse::<i64>() {
        return ParamValue::Int(v);
    }
    if let Ok(v) = raw.parse::<f32>() {
        return ParamValue::Float(v);
    }
    if raw.contains(',') {
        let list: Result<Vec<f32>, _> = raw.split(',').map(|v| v.trim().parse::<f32>()).collect();
        if let Ok(list) = list {
            return ParamValue::FloatArray(list);
        }
    }
    ParamValue::String(raw.to_string())
}
