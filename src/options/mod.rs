use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;

/// Load a CSV file into a relational table, creating it or appending to it.
///
/// Database URL and credentials are read interactively afterwards, on purpose:
/// passing them as arguments would leak them into shell history and process
/// listings.
#[derive(Parser, Debug)]
#[command(name = "csvsync")]
pub struct Cli {
    /// Path to the CSV file to load
    pub csv_path: PathBuf,

    /// Name of the target table
    pub table_name: String,

    /// Schema the target table lives in
    pub schema_name: String,
}

impl Cli {
    pub fn table_identity(&self) -> TableIdentity {
        TableIdentity::new(&self.schema_name, &self.table_name)
    }
}

/// The `(schema, name)` pair identifying a target table.
///
/// Both parts are opaque identifier strings. Nothing here validates them for
/// SQL safety; they are interpolated verbatim into generated statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableIdentity {
    schema: String,
    name: String,
}

impl TableIdentity {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted form used in generated SQL.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

impl fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// Connection info handed opaquely to the database driver.
///
/// Deliberately no `Debug` derive so the password can't end up in logs.
#[derive(Clone)]
pub struct ConnectionCredentials {
    pub url: String,
    pub user: String,
    pub password: String,
}

/// Reads URL, username and password from the terminal.
///
/// Password entry goes through a non-echoing prompt when stdin is a terminal
/// and falls back to plain line input otherwise (piped input, tests).
pub fn prompt_credentials() -> io::Result<ConnectionCredentials> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let url = prompt_line(&mut input, &mut out, "Database URL: ")?;
    let user = prompt_line(&mut input, &mut out, "Username: ")?;
    let password = if interactive {
        rpassword::prompt_password("Password: ")?
    } else {
        read_password_line(&mut input, &mut out)?
    };

    Ok(ConnectionCredentials {
        url,
        user,
        password,
    })
}

/// Credential acquisition over arbitrary streams, so tests can feed canned
/// input. Re-asks for URL and username on empty lines; an empty password is
/// accepted as-is.
pub fn read_credentials<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<ConnectionCredentials> {
    let url = prompt_line(input, out, "Database URL: ")?;
    let user = prompt_line(input, out, "Username: ")?;
    let password = read_password_line(input, out)?;

    Ok(ConnectionCredentials {
        url,
        user,
        password,
    })
}

fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<String> {
    loop {
        let line = ask(input, out, prompt)?;
        if !line.is_empty() {
            return Ok(line);
        }
    }
}

fn read_password_line<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    ask(input, out, "Password: ")
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while prompting for credentials",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::Parser;

    use super::*;

    #[test]
    fn cli_takes_exactly_three_positional_arguments() {
        let cli = Cli::try_parse_from(["csvsync", "data.csv", "people", "staging"]).unwrap();
        assert_eq!(cli.csv_path, PathBuf::from("data.csv"));
        assert_eq!(cli.table_identity(), TableIdentity::new("staging", "people"));

        assert!(Cli::try_parse_from(["csvsync", "data.csv", "people"]).is_err());
        assert!(Cli::try_parse_from(["csvsync", "a", "b", "c", "d"]).is_err());
    }

    #[test]
    fn identity_renders_as_schema_dot_name() {
        let id = TableIdentity::new("staging", "people");
        assert_eq!(id.qualified(), "staging.people");
        assert_eq!(id.to_string(), "staging.people");
    }

    #[test]
    fn reads_all_three_fields() {
        let mut input = Cursor::new("duck.db\nalice\nsecret\n");
        let mut out = Vec::new();

        let creds = read_credentials(&mut input, &mut out).unwrap();
        assert_eq!(creds.url, "duck.db");
        assert_eq!(creds.user, "alice");
        assert_eq!(creds.password, "secret");

        let prompts = String::from_utf8(out).unwrap();
        assert_eq!(prompts, "Database URL: Username: Password: ");
    }

    #[test]
    fn empty_lines_reprompt_for_url_and_user() {
        let mut input = Cursor::new("\n\nduck.db\nalice\npw\n");
        let mut out = Vec::new();

        let creds = read_credentials(&mut input, &mut out).unwrap();
        assert_eq!(creds.url, "duck.db");
        assert_eq!(creds.user, "alice");
    }

    #[test]
    fn empty_password_is_accepted() {
        let mut input = Cursor::new("duck.db\nalice\n\n");
        let mut out = Vec::new();

        let creds = read_credentials(&mut input, &mut out).unwrap();
        assert_eq!(creds.password, "");
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new("duck.db\n");
        let mut out = Vec::new();

        let err = read_credentials(&mut input, &mut out).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
