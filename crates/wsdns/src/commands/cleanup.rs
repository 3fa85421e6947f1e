use crate::utils::HookArgs;
use colored::Colorize;
use wsdns_api::DeleteOutcome;

pub async fn handle(hook: &HookArgs) -> anyhow::Result<()> {
    let fqdn = hook.fqdn();
    println!("{} {}", "Removing challenge record".yellow(), fqdn.cyan());

    let authenticator = hook.authenticator()?;
    match authenticator
        .cleanup(&hook.domain, &fqdn, &hook.validation)
        .await?
    {
        Some(DeleteOutcome::Deleted(id)) => println!("  ✓ Record {} deleted", id),
        Some(DeleteOutcome::NotFound) => println!("  {}", "No record found".yellow()),
        Some(DeleteOutcome::Ambiguous(n)) => println!(
            "  {}",
            format!("{} matching records, left untouched", n).yellow()
        ),
        None => println!("  {}", "Cleanup failed, see log".red()),
    }

    Ok(())
}
