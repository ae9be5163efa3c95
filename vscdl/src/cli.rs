//! Command line arguments

use std::collections::HashMap;

pub const USAGE: &str = "\
Usage: vscdl <domain|project|dpl_id> [output]

Download the source code of a Vercel deployment.

Options:
  --download=<id>          Deployment URL, project name or id (same as the first argument)
  --output=<dir>           Output directory (defaults to the identifier)
  --team=<id>              Team scope (overrides VERCEL_TEAM)
  --settings=<path>        JSON settings file
  --debug                  Verbose logging
  --json-logs              Log as JSON lines
  --version                Print version information
  --help                   Print this help

Projects and team:
  --list-projects
  --create-project=<name>
  --update-project=<id> --name=<new-name>
  --delete-project=<id>
  --list-members
  --add-member=<email>
  --remove-member=<email>

Environment:
  VERCEL_API_TOKEN         Bearer token (required)
  VERCEL_TEAM              Team id
  VERCEL_API_BASE          API base URL
";

/// Raw arguments: positionals, `--key=value` options and bare `--flag`s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub positionals: Vec<String>,
    pub options: HashMap<String, String>,
}

impl CliArgs {
    /// Parse arguments, without the program name
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();

        for arg in args.into_iter().map(Into::into) {
            if arg.starts_with('-') && arg.len() > 1 {
                let (key, value) = match arg.split_once('=') {
                    Some((key, value)) => (key, value.to_string()),
                    None => (arg.as_str(), String::new()),
                };
                let key = canonical_key(key.trim_start_matches('-'));
                parsed.options.insert(key.to_string(), value);
            } else {
                parsed.positionals.push(arg);
            }
        }

        parsed
    }

    pub fn flag(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Value of a `--key=value` option; bare flags have none
    pub fn value(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The command these arguments ask for
    pub fn command(&self) -> Result<Command, String> {
        if self.flag("help") {
            return Ok(Command::Help);
        }
        if self.flag("version") {
            return Ok(Command::Version);
        }
        if self.flag("list-projects") {
            return Ok(Command::ListProjects);
        }
        if let Some(name) = self.value("create-project") {
            return Ok(Command::CreateProject {
                name: name.to_string(),
            });
        }
        if let Some(id) = self.value("update-project") {
            let name = self
                .value("name")
                .ok_or_else(|| "--update-project requires --name=<new-name>".to_string())?;
            return Ok(Command::UpdateProject {
                id: id.to_string(),
                name: name.to_string(),
            });
        }
        if let Some(id) = self.value("delete-project") {
            return Ok(Command::DeleteProject { id: id.to_string() });
        }
        if self.flag("list-members") {
            return Ok(Command::ListMembers);
        }
        if let Some(email) = self.value("add-member") {
            return Ok(Command::AddMember {
                email: email.to_string(),
            });
        }
        if let Some(email) = self.value("remove-member") {
            return Ok(Command::RemoveMember {
                email: email.to_string(),
            });
        }

        let download = self.value("download");
        let identifier = download
            .map(str::to_string)
            .or_else(|| self.positionals.first().cloned())
            .ok_or_else(|| "Missing deployment URL, project name or id".to_string())?;

        // With --download=<id> the first positional is the output
        let output_index = if download.is_some() { 0 } else { 1 };
        let output = self
            .value("output")
            .map(str::to_string)
            .or_else(|| self.positionals.get(output_index).cloned());

        Ok(Command::Download { identifier, output })
    }
}

fn canonical_key(key: &str) -> &str {
    match key {
        "d" => "download",
        "o" => "output",
        "h" => "help",
        "v" | "V" => "version",
        other => other,
    }
}

/// What to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Download {
        identifier: String,
        output: Option<String>,
    },
    ListProjects,
    CreateProject {
        name: String,
    },
    UpdateProject {
        id: String,
        name: String,
    },
    DeleteProject {
        id: String,
    },
    ListMembers,
    AddMember {
        email: String,
    },
    RemoveMember {
        email: String,
    },
}
