//! Value parsers for command-line arguments.

use std::fs;
use std::path::PathBuf;

pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!("Port must be a valid number between 1 and 65535, got: '{}'", port_str)
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Requires an existing, readable file.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() != 4 || parts.iter().any(|p| p.parse::<u8>().is_err()) {
            return Err(format!("Invalid IPv4 address format: '{}'", host_str));
        }
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    Ok(host.to_string())
}

/// Accepts absolute `http://` and `https://` URLs.
pub fn validate_http_url(url_str: &str) -> Result<String, String> {
    let url = url_str.trim();
    let parsed = reqwest::Url::parse(url).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(url.to_string()),
        "http" | "https" => Err(format!("URL has no host: '{}'", url_str)),
        scheme => Err(format!("URL must use http or https, got '{}'", scheme)),
    }
}

pub fn validate_page(page_str: &str) -> Result<u32, String> {
    match page_str.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(format!("Page must be a number of at least 1, got: '{}'", page_str)),
    }
}

pub fn validate_page_size(size_str: &str) -> Result<u32, String> {
    match size_str.parse::<u32>() {
        Ok(size) if (1..=100).contains(&size) => Ok(size),
        _ => Err(format!("Page size must be between 1 and 100, got: '{}'", size_str)),
    }
}

pub fn validate_mp_id(id_str: &str) -> Result<i64, String> {
    match id_str.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Account ID must be a positive integer, got: '{}'", id_str)),
    }
}
