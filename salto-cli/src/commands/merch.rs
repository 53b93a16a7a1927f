use anyhow::Result;
use owo_colors::OwoColorize;
use salto_core::config::EventConfig;

pub fn run(event: &EventConfig) -> Result<()> {
    if event.products.is_empty() {
        println!("{}", "Nenhum produto cadastrado".dimmed());
        return Ok(());
    }

    for product in &event.products {
        let price = format!("R$ {}", product.price);
        println!("  {} {}", product.name, price.green());
        if let Some(link) = &product.purchase_link {
            println!("    {}", link.dimmed());
        }
    }

    Ok(())
}
