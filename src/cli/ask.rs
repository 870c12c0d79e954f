//! One-shot commands: `ask` and `classify`

use serde_json::json;

use crate::domain::{IntentClassifier, KeywordClassifier, normalize_question};

/// Answers one question and prints the same JSON body `/ask` returns
pub async fn run(question: &str) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state_with_config(&config).await?;

    let answer = state.answer_service.answer(question).await?;
    println!("{}", serde_json::to_string_pretty(&answer)?);

    Ok(())
}

/// Prints the route label without touching any backend
pub fn classify(question: &str) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let classifier = KeywordClassifier::new(&config.classifier)?;
    let label = classifier.classify(&normalize_question(question));

    println!(
        "{}",
        json!({
            "label": label.name(),
            "source": label.source_tag(),
        })
    );

    Ok(())
}
