//! Local request validation. Anything the backend would reject anyway is
//! rejected here first, before a request is built, so a bad form never
//! costs a round-trip.

use models::NewExpense;

pub fn validate_new_expense(expense: &NewExpense) -> Result<(), String> {
    if !expense.amount.is_finite() || expense.amount <= 0.0 {
        return Err("amount must be greater than zero".to_string());
    }
    if expense.category.as_str().trim().is_empty() {
        return Err("category is required".to_string());
    }
    if expense.description.trim().is_empty() {
        return Err("description is required".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let trimmed = email.trim();
    let well_formed = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if well_formed {
        Ok(())
    } else {
        Err(format!("'{trimmed}' is not a valid email address"))
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("password is required".to_string());
    }
    Ok(())
}
