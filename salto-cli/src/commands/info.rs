use anyhow::Result;
use owo_colors::OwoColorize;
use salto_core::config::EventConfig;
use salto_core::session::EventDay;

/// Venue, dates and ticket information, in program order.
pub fn run(event: &EventConfig) -> Result<()> {
    println!("{}", "SALTO NO HYPE".bold());
    println!();

    let mut dates: Vec<String> = Vec::new();
    let mut seen: Vec<EventDay> = Vec::new();
    for session in &event.sessions {
        if !seen.contains(&session.day) {
            seen.push(session.day);
            dates.push(format!(
                "{} {}",
                session.day.label(),
                session.start_date_in(event.timezone)
            ));
        }
    }

    println!("  {} {}", "Datas:".dimmed(), dates.join(", "));
    println!("  {} {}", "Local:".dimmed(), event.venue.name);
    println!("         {}", event.venue.address);
    println!("         {}", event.venue.city);
    println!();

    println!(
        "  {} R$ {} ({})",
        "Ingresso:".dimmed(),
        event.tickets.price,
        event.tickets.lot
    );
    if let Some(presale) = event.tickets.presale_price {
        println!("  {} R$ {}", "Pré-venda:".dimmed(), presale);
    }
    for benefit in &event.tickets.benefits {
        println!("    - {benefit}");
    }
    println!();

    println!("  {} {}", "Ingressos:".dimmed(), event.links.tickets);
    Ok(())
}
