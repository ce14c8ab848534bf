//! Exhaustive exploration mode.
//!
//! Attaches to the browser, walks every branch of the form, and writes four
//! artifacts: the raw final-state HTML snapshot, the structured field list
//! parsed from it, the full decision tree, and a Mermaid diagram. When the
//! form has no radio entry question the run aborts, but the raw snapshot is
//! still written so the unexpected page can be inspected.

use std::path::Path;

use formscout_explorer::session::FormSession;
use formscout_explorer::{explore, ExploreError, FormProfile, LiveForm, WalkOptions};
use formscout_flow::{mermaid, parse_form_snapshot};

use crate::artifacts;

pub async fn run(profile: FormProfile) -> anyhow::Result<()> {
    let data_dir = profile.data_dir.clone();
    let wrapper = profile.field_wrapper.clone();
    let options = profile.walk_options();

    let mut session = LiveForm::attach(profile).await?;
    tracing::info!(url = %session.profile().start_url, "starting exhaustive exploration");
    explore_and_save(&mut session, &options, &data_dir, &wrapper).await
}

async fn explore_and_save<S: FormSession>(
    session: &mut S,
    options: &WalkOptions,
    data_dir: &Path,
    wrapper: &str,
) -> anyhow::Result<()> {
    let html_path = data_dir.join("form.html");

    let tree = match explore(session, options).await {
        Ok(tree) => tree,
        Err(err @ ExploreError::NoEntryQuestion) => {
            let html = session.page_html().await?;
            artifacts::save_text(&html, &html_path)?;
            println!("Raw snapshot saved to {}", html_path.display());
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    let html = session.page_html().await?;
    artifacts::save_text(&html, &html_path)?;

    let outline = parse_form_snapshot(&html, wrapper)?;
    let fields_path = data_dir.join("form_fields.json");
    artifacts::save_json(&outline, &fields_path)?;

    let flow_path = data_dir.join("flow.json");
    artifacts::save_json(&tree, &flow_path)?;

    let mmd_path = data_dir.join("flow.mmd");
    artifacts::save_text(&mermaid::render(&tree), &mmd_path)?;

    println!("Raw snapshot saved to {}", html_path.display());
    println!("Field list saved to {}", fields_path.display());
    println!("Flow JSON saved to {}", flow_path.display());
    println!("Mermaid diagram saved to {}", mmd_path.display());
    Ok(())
}
