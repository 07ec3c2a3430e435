//! Look up one word from the command line.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fmt::Write;

use crate::config::Config;
use crate::models::{Definition, SenseEntry};
use crate::server::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// `kamoes lookup <word>`
#[derive(Args)]
pub struct LookupCommand {
    /// Word to look up
    word: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl LookupCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        let app = App::init(config).await?;

        let Some(definitions) = app.lookup().lookup(&self.word).await? else {
            bail!("No entries found for '{}'", self.word);
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&definitions)?),
            OutputFormat::Text => print!("{}", render_text(&definitions)),
        }
        Ok(())
    }
}

fn render_text(definitions: &[Definition]) -> String {
    let mut out = String::new();

    for definition in definitions {
        let label = definition.syllabification.as_deref().unwrap_or("-");
        let _ = write!(out, "{}", label.bold());
        if let Some(pronunciation) = &definition.pronunciation_spelling {
            let _ = write!(out, " /{pronunciation}/");
        }
        if let Some(root) = &definition.root_word {
            let _ = write!(out, " (root: {root})");
        }
        out.push('\n');

        if let Some(alternate) = &definition.alternate_form {
            let note = if definition.is_canonical {
                format!("non-canonical form: {alternate}")
            } else {
                format!("non-canonical form of {alternate}")
            };
            let _ = writeln!(out, "  {}", note.yellow());
        }

        for (i, sense) in definition.senses.iter().enumerate() {
            let tag = sense.part_of_speech().map(|t| format!("[{t}] ").cyan().to_string());
            let _ = write!(out, "  {}. {}", i + 1, tag.unwrap_or_default());
            match sense {
                SenseEntry::Sense(sense) => {
                    for attribution in &sense.attributions {
                        let _ = write!(out, "{} ", format!("[{}]", attribution.source_tag).cyan());
                    }
                    out.push_str(&sense.gloss);
                    if let Some(example) = &sense.example {
                        let _ = write!(out, ": {}", example.italic());
                    }
                }
                SenseEntry::Reference(reference) => {
                    let _ = write!(out, "see {}", reference.targets.join(", "));
                }
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReferenceSense, Sense};

    #[test]
    fn test_render_text() {
        let definitions = vec![
            Definition {
                syllabification: Some("za.man".to_string()),
                root_word: None,
                pronunciation_spelling: Some("zaman".to_string()),
                is_canonical: true,
                alternate_form: Some("jaman".to_string()),
                senses: vec![SenseEntry::Sense(Sense {
                    part_of_speech: Some("nomina".to_string()),
                    part_of_speech_label: Some("kata benda".to_string()),
                    gloss: "masa".to_string(),
                    example: Some("zaman batu".to_string()),
                    attributions: vec![],
                })],
            },
            Definition {
                syllabification: Some("ju.ang".to_string()),
                root_word: None,
                pronunciation_spelling: Some("juang".to_string()),
                is_canonical: true,
                alternate_form: None,
                senses: vec![SenseEntry::Reference(ReferenceSense {
                    part_of_speech: Some("prakategorial".to_string()),
                    part_of_speech_label: None,
                    targets: vec!["berjuang".to_string(), "pejuang".to_string()],
                })],
            },
        ];

        let text = render_text(&definitions);
        assert!(text.contains("za.man"));
        assert!(text.contains("/zaman/"));
        assert!(text.contains("non-canonical form: jaman"));
        assert!(text.contains("masa"));
        assert!(text.contains("zaman batu"));
        assert!(text.contains("see berjuang, pejuang"));
    }
}
