use anyhow::Result;
use owo_colors::OwoColorize;
use salto_core::config::EventConfig;

pub fn run(event: &EventConfig) -> Result<()> {
    if event.faq.is_empty() {
        println!("{}", "Nenhuma pergunta cadastrada".dimmed());
        return Ok(());
    }

    for entry in &event.faq {
        println!("{}", entry.question.bold());
        println!("  {}", entry.answer);
        println!();
    }

    Ok(())
}
