/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address".to_string());
    }
    None
}

pub fn validate_password_present(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    None
}

/// Tons requested for a delivery; must be a positive, finite number.
pub fn validate_quantity(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Requested quantity is required".to_string());
    }
    match trimmed.parse::<f64>() {
        Ok(q) if q.is_finite() && q > 0.0 => Ok(q),
        Ok(_) => Err("Requested quantity must be greater than 0".to_string()),
        Err(_) => Err("Requested quantity must be a number".to_string()),
    }
}

/// Backend identifiers are positive integers.
pub fn validate_id(raw: &str, field_name: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("{field_name} is missing or invalid")),
    }
}
