use std::str::FromStr;

use pb_core::registration::{AccountKind, RegistrationField, UnknownAccountKind, UnknownField};

/// One line of user input in the registration wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `set <field> <value...>`; the value may contain spaces or be empty.
    Set {
        field: RegistrationField,
        value: String,
    },
    Account(AccountKind),
    Next,
    Back,
    Resend,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Field(#[from] UnknownField),
    #[error(transparent)]
    AccountKind(#[from] UnknownAccountKind),
}

pub const HELP: &str = "\
commands:
  set <field> <value>   fill a field (cpf, name, phone, email, password,
                        password_confirmation, code, street, number, city,
                        uf, account_password, account_password_confirmation)
  account <kind>        checking | savings
  next                  validate this step and continue
  back                  previous step
  resend                send the verification code again
  show                  print the current step
  quit                  abandon registration";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("field name"));
                }
                Ok(Command::Set {
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            "account" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("account kind"));
                }
                Ok(Command::Account(rest.parse()?))
            }
            "next" | "n" => Ok(Command::Next),
            "back" | "b" => Ok(Command::Back),
            "resend" => Ok(Command::Resend),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
