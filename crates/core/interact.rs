use bookmeta::Isbn;
use dialoguer::Input;
use eyre::{eyre, Context, Result};

/// Prompts until a well formed ISBN is entered.
pub fn user_isbn() -> Result<String> {
    Input::new()
        .with_prompt("ISBN")
        .validate_with(|input: &String| -> Result<(), String> {
            Isbn::parse(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}
