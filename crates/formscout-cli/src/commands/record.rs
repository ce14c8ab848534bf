//! Interactive recording mode.
//!
//! Walks the form once, asking the user at each question, then writes the
//! raw HTML snapshot and the recorded single path.

use formscout_explorer::session::FormSession as _;
use formscout_explorer::{record, FormProfile, LiveForm};

use crate::artifacts;
use crate::picker::TerminalPicker;

pub async fn run(profile: FormProfile) -> anyhow::Result<()> {
    println!(
        "[record mode] Answer each question as prompted; the run is saved when the form ends.\n"
    );

    let data_dir = profile.data_dir.clone();
    let mut session = LiveForm::attach(profile).await?;
    tracing::info!(url = %session.profile().start_url, "starting recorded walkthrough");
    session.reset().await?;

    let mut picker = TerminalPicker;
    let run = record(&mut session, &mut picker).await?;
    let html = session.page_html().await?;

    let html_path = data_dir.join("form.html");
    artifacts::save_text(&html, &html_path)?;

    let run_path = data_dir.join("recorded_run.json");
    artifacts::save_json(&run, &run_path)?;

    println!("Raw snapshot saved to {}", html_path.display());
    println!("Recorded run saved to {}", run_path.display());
    Ok(())
}
