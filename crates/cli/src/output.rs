//! Structured output handling for CLI commands.

use serde::Serialize;

#[derive(clap::ValueEnum, Clone, Debug, Default, PartialEq, Eq, Copy)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Returns true if the output format is intended for machine consumption
    pub fn is_machine_readable(&self) -> bool {
        match self {
            OutputFormat::Human => false,
            OutputFormat::Json | OutputFormat::Yaml => true,
        }
    }
}

/// Helper struct for machine-readable command responses
#[derive(Serialize)]
pub struct CommandResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> CommandResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            exit_code: Some(0),
            data,
        }
    }

    pub fn error(message: String, exit_code: i32, data: T) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message),
            exit_code: Some(exit_code),
            data,
        }
    }
}

/// Print the output to stdout in the requested format
pub fn print_output<T: Serialize>(format: OutputFormat, data: T) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => {
            // In human mode the command has already printed its own
            // progress and output; nothing to add here.
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&data)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&data)?;
            println!("{}", yaml);
        }
    }
    Ok(())
}

/// Print a structured success response for machine outputs
pub fn print_success<T: Serialize>(format: OutputFormat, data: T) -> anyhow::Result<()> {
    if format == OutputFormat::Human {
        return Ok(());
    }

    let response = CommandResponse::success(data);
    print_output(format, response)
}

/// Print a structured error response for machine outputs.
/// Human-mode errors are printed to stderr by main's error handler.
pub fn print_error(format: OutputFormat, message: &str, exit_code: i32) -> anyhow::Result<()> {
    if format == OutputFormat::Human {
        return Ok(());
    }

    let response = CommandResponse::error(message.to_string(), exit_code, serde_json::Map::new());
    print_output(format, response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_response_flattens_data() {
        #[derive(Serialize)]
        struct Data {
            metric: String,
        }

        let response = CommandResponse::success(Data {
            metric: "histogram.buckets".to_string(),
        });
        let v = serde_json::to_value(&response).unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["metric"], "histogram.buckets");
    }

    #[test]
    fn test_error_response_serializes_without_data() {
        let response = CommandResponse::error("boom".to_string(), 5, serde_json::Map::new());
        let v = serde_json::to_value(&response).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["message"], "boom");
        assert_eq!(v["exit_code"], 5);
    }
}
