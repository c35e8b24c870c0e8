//! Validate and re-emit JSON documents

use std::path::PathBuf;

use log::debug;

use super::CliError;
use crate::{Parser, ParserConfig, Value, convert::to_serde, to_json};

/// Where the document is read from
#[derive(Debug, Clone)]
pub enum Input {
    /// Inline JSON text, e.g. piped through stdin
    Text(String),
    /// Path of a file to stream from
    File(PathBuf),
}

/// Options for the check and emit commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The document to parse
    pub input: Option<Input>,
    /// Buffer sizes for the parser
    pub config: ParserConfig,
    /// Print the parsed document instead of a verdict
    pub emit: bool,
    /// Pretty-print emitted output
    pub pretty: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The document parsed
    Valid,
    /// The document parsed and was written back out
    Emitted(String),
}

/// Execute a check or emit operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let parser = Parser::with_config(options.config);

    let value = match input {
        Input::Text(text) => parser.parse_str(text)?,
        Input::File(path) => {
            debug!("Parsing {}", path.display());
            parser.parse_file(path)?
        }
    };

    if !options.emit {
        return Ok(CheckResult::Valid);
    }
    Ok(CheckResult::Emitted(render(value, options.pretty)?))
}

fn render(value: Value, pretty: bool) -> Result<String, CliError> {
    if pretty {
        Ok(serde_json::to_string_pretty(&to_serde(value))?)
    } else {
        Ok(to_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    fn options(text: &str, emit: bool) -> CheckOptions {
        CheckOptions {
            input: Some(Input::Text(text.to_string())),
            emit,
            ..CheckOptions::default()
        }
    }

    #[test]
    fn test_check_valid() {
        let result = execute_check(&options(r#"{"a": [1, 2]}"#, false)).unwrap();
        assert!(matches!(result, CheckResult::Valid));
    }

    #[test]
    fn test_check_invalid() {
        let err = execute_check(&options("[1 1]", false)).unwrap_err();
        assert!(matches!(err, CliError::Parse(ParseError::Malformed { .. })));
        assert_eq!(err.to_string(), "Multiple values found at index 4, json preview '[1 1]'");
    }

    #[test]
    fn test_emit_canonical() {
        let result = execute_check(&options("{ \"b\" : 1.0 , \"a\" : [ true ] }", true)).unwrap();
        match result {
            CheckResult::Emitted(text) => assert_eq!(text, r#"{"a":[true],"b":1.0}"#),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_emit_pretty() {
        let mut opts = options(r#"{"a":1}"#, true);
        opts.pretty = true;
        match execute_check(&opts).unwrap() {
            CheckResult::Emitted(text) => assert_eq!(text, "{\n  \"a\": 1\n}"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_no_input() {
        let err = execute_check(&CheckOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::NoInput));
    }

    #[test]
    fn test_file_input() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"["x", {"y": null}]"#).unwrap();
        let opts = CheckOptions {
            input: Some(Input::File(file.path().to_path_buf())),
            emit: true,
            ..CheckOptions::default()
        };
        match execute_check(&opts).unwrap() {
            CheckResult::Emitted(text) => assert_eq!(text, r#"["x",{"y":null}]"#),
            other => panic!("unexpected {:?}", other),
        }
    }
}
