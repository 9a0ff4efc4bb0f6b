//! Console commands
//!
//! One command per input line; the first word selects the command and the
//! rest of the line is its argument.

use std::str::FromStr;

use core_kernel::ImageUpload;
use domain_claims::{ClaimStatus, Severity};

use crate::error::DashboardError;

/// Usage text printed by `help`
pub const USAGE: &str = "\
Commands:
  status <UNDER_REVIEW|PENDING|APPROVED|CLOSED>   force a status
  submit                                          submit for approval (auto-approves)
  approve                                         mark approved
  send-ra                                         send repair authorization (closes)
  rerun                                           re-run the automated assessment
  upload <path> [path..]                          attach images and re-run
  severity <index> <Minor|Moderate|Major|Severe>  edit a damage severity
  type <index> <text>                             edit a damage type
  add                                             add a damage row
  remove <index>                                  remove a damage row
  estimate <value>                                set the final estimate
  notes <text>                                    set agent notes
  confidence [--strict] <value>                   override overall confidence
  download                                        export the repair authorization
  show | audit | history | json                   inspect the dashboard
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status(ClaimStatus),
    Submit,
    Approve,
    SendRepairAuthorization,
    Rerun,
    Upload(Vec<ImageUpload>),
    Severity { index: usize, severity: Severity },
    Type { index: usize, damage_type: String },
    Add,
    Remove(usize),
    Estimate(String),
    Notes(String),
    /// With `strict`, input that is not a whole number in 0..=100 is rejected
    Confidence { input: String, strict: bool },
    Download,
    Show,
    Audit,
    History,
    Json,
    Help,
    Quit,
}

fn invalid(message: impl Into<String>) -> DashboardError {
    DashboardError::InvalidCommand(message.into())
}

fn parse_index(word: Option<&str>, command: &str) -> Result<usize, DashboardError> {
    let word = word.ok_or_else(|| invalid(format!("{} needs a damage index", command)))?;
    word.parse()
        .map_err(|_| invalid(format!("'{}' is not a damage index", word)))
}

/// Splits off the first word, keeping the remainder verbatim
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (input, ""),
    }
}

impl FromStr for Command {
    type Err = DashboardError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line);
        let command = match name.to_ascii_lowercase().as_str() {
            "status" => Command::Status(rest.parse()?),
            "submit" => Command::Submit,
            "approve" => Command::Approve,
            "send-ra" => Command::SendRepairAuthorization,
            "rerun" => Command::Rerun,
            "upload" => {
                let uploads: Vec<_> = rest.split_whitespace().map(ImageUpload::from_name).collect();
                if uploads.is_empty() {
                    return Err(invalid("upload needs at least one path"));
                }
                Command::Upload(uploads)
            }
            "severity" => {
                let (index, severity) = split_word(rest);
                Command::Severity {
                    index: parse_index(Some(index).filter(|s| !s.is_empty()), "severity")?,
                    severity: severity.parse()?,
                }
            }
            "type" => {
                let (index, damage_type) = split_word(rest);
                Command::Type {
                    index: parse_index(Some(index).filter(|s| !s.is_empty()), "type")?,
                    damage_type: damage_type.to_string(),
                }
            }
            "add" => Command::Add,
            "remove" => Command::Remove(parse_index(rest.split_whitespace().next(), "remove")?),
            "estimate" => Command::Estimate(rest.to_string()),
            "notes" => Command::Notes(rest.to_string()),
            "confidence" => match split_word(rest) {
                ("--strict", input) => Command::Confidence {
                    input: input.to_string(),
                    strict: true,
                },
                _ => Command::Confidence {
                    input: rest.to_string(),
                    strict: false,
                },
            },
            "download" => Command::Download,
            "show" => Command::Show,
            "audit" => Command::Audit,
            "history" => Command::History,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(invalid("empty command")),
            other => return Err(invalid(format!("unknown command '{}'", other))),
        };
        Ok(command)
    }
}
