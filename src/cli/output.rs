use super::config::OutputFormat;
use dotquad::{ParseError, octets};
use serde::Serialize;

#[derive(Serialize)]
struct JsonAddress<'a> {
    input: &'a str,
    address: String,
    octets: [u8; 4],
}

#[derive(Serialize)]
struct JsonError<'a> {
    input: &'a str,
    error: &'static str,
}

/// Render one parsed address.
pub fn format_address(
    token: &str,
    address: u32,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    let [a, b, c, d] = octets(address);
    Ok(match format {
        OutputFormat::Dotted => format!("{}.{}.{}.{}", a, b, c, d),
        OutputFormat::Hex => format!("{:x}.{:x}.{:x}.{:x}", a, b, c, d),
        OutputFormat::Packed => address.to_string(),
        OutputFormat::Json => serde_json::to_string(&JsonAddress {
            input: token,
            address: format!("{}.{}.{}.{}", a, b, c, d),
            octets: [a, b, c, d],
        })?,
    })
}

/// Render a rejected token in report mode.
pub fn format_error(
    token: &str,
    error: ParseError,
    format: OutputFormat,
    message: &str,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string(&JsonError {
            input: token,
            error: error.as_str(),
        }),
        _ => Ok(message.to_string()),
    }
}
