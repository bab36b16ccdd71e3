//! Positional parameter extraction.
//!
//! Every wire method has a fixed arity; a violation is an invalid-params
//! fault in the reply, not a transport error.

use serde_json::{Map, Value};

use scribe_shared::rpc::Fault;

pub fn expect_arity(method: &'static str, params: &[Value], arity: usize) -> Result<(), Fault> {
    if params.len() == arity {
        Ok(())
    } else {
        Err(Fault::invalid_params(format!(
            "{method} takes {arity} parameters, got {}",
            params.len()
        )))
    }
}

pub fn str_param<'a>(params: &'a [Value], idx: usize, name: &'static str) -> Result<&'a str, Fault> {
    params
        .get(idx)
        .and_then(Value::as_str)
        .ok_or_else(|| Fault::invalid_params(format!("parameter {idx} ({name}) must be a string")))
}

pub fn int_param(params: &[Value], idx: usize, name: &'static str) -> Result<i64, Fault> {
    params
        .get(idx)
        .and_then(Value::as_i64)
        .ok_or_else(|| Fault::invalid_params(format!("parameter {idx} ({name}) must be an integer")))
}

pub fn struct_param<'a>(
    params: &'a [Value],
    idx: usize,
    name: &'static str,
) -> Result<&'a Map<String, Value>, Fault> {
    params
        .get(idx)
        .and_then(Value::as_object)
        .ok_or_else(|| Fault::invalid_params(format!("parameter {idx} ({name}) must be a struct")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use scribe_shared::rpc::FAULT_INVALID_PARAMS;

    use super::*;

    #[test]
    fn arity_mismatch_faults() {
        let fault = expect_arity("wp.getPages", &[json!(1)], 4).unwrap_err();
        assert_eq!(fault.code, FAULT_INVALID_PARAMS);
    }

    #[test]
    fn wrong_types_fault() {
        let params = vec![json!(5), json!("five")];
        assert!(str_param(&params, 0, "blogid").is_err());
        assert!(int_param(&params, 1, "num_posts").is_err());
        assert!(struct_param(&params, 1, "content").is_err());
    }

    #[test]
    fn happy_path_extracts() {
        let params = vec![json!("blog"), json!(5), json!({"title": "x"})];
        assert_eq!(str_param(&params, 0, "blogid").unwrap(), "blog");
        assert_eq!(int_param(&params, 1, "num_posts").unwrap(), 5);
        assert!(struct_param(&params, 2, "content").unwrap().contains_key("title"));
    }
}
