//! Lookup Discord commands - dictionary, random fact and QR code.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        api::lookup::Definition,
        bot::{BotData, render},
        core::{reflow::reflow, render::{EmbedView, FIELD_VALUE_LIMIT}},
        errors::{Error, Result},
    };
    use poise::{CreateReply, serenity_prelude::CreateAttachment};
    use std::fmt::Write;

    fn definition_embed(definition: &Definition) -> Result<EmbedView> {
        let mut embed = EmbedView::new(format!("📖 {}", definition.word));
        if let Some(phonetic) = &definition.phonetic {
            embed = embed.description(phonetic.clone());
        }

        for meaning in &definition.meanings {
            let mut lines = Vec::with_capacity(meaning.definitions.len());
            for (i, d) in meaning.definitions.iter().enumerate() {
                let mut line = format!("{}. {}", i + 1, d.definition);
                if let Some(example) = &d.example {
                    write!(&mut line, "\n   _\"{example}\"_")?;
                }
                lines.push(line);
            }
            for group in reflow(&lines, FIELD_VALUE_LIMIT) {
                embed = embed.field(meaning.part_of_speech.clone(), group, false);
            }
        }
        Ok(embed)
    }

    /// Looks up the definition of an English word.
    #[poise::command(slash_command)]
    pub async fn define(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Word to define"] word: String,
    ) -> Result<()> {
        ctx.defer().await?;
        let definition = ctx.data().lookup.define(&word).await?;
        ctx.send(CreateReply::default().embed(render::embed(&definition_embed(&definition)?)))
            .await?;
        Ok(())
    }

    /// Tells a random fact.
    #[poise::command(slash_command)]
    pub async fn fact(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let fact = ctx.data().lookup.random_fact().await?;
        ctx.say(format!("💡 {fact}")).await?;
        Ok(())
    }

    /// Turns text into a QR code.
    #[poise::command(slash_command)]
    pub async fn qr(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Text or link to encode"] text: String,
    ) -> Result<()> {
        ctx.defer().await?;
        let png = ctx.data().lookup.qr_code(&text).await?;
        ctx.send(CreateReply::default().attachment(CreateAttachment::bytes(png, "qr.png")))
            .await?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]
        use super::*;
        use crate::api::lookup::{DefinitionText, Meaning};

        #[test]
        fn test_definition_embed_one_field_per_meaning() {
            let definition = Definition {
                word: "hub".to_string(),
                phonetic: Some("/hʌb/".to_string()),
                meanings: vec![Meaning {
                    part_of_speech: "noun".to_string(),
                    definitions: vec![
                        DefinitionText {
                            definition: "The center of a wheel.".to_string(),
                            example: None,
                        },
                        DefinitionText {
                            definition: "A central airport.".to_string(),
                            example: Some("a busy hub".to_string()),
                        },
                    ],
                }],
            };

            let embed = definition_embed(&definition).unwrap();
            assert_eq!(embed.fields.len(), 1);
            assert_eq!(embed.fields[0].name, "noun");
            assert_eq!(
                embed.fields[0].value,
                "1. The center of a wheel.\n2. A central airport.\n   _\"a busy hub\"_"
            );
        }
    }
}

// Re-export all commands
pub use inner::*;
