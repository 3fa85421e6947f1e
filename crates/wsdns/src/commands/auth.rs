use crate::utils::HookArgs;
use colored::Colorize;
use std::time::Duration;

pub async fn handle(hook: &HookArgs, propagation_seconds: u64) -> anyhow::Result<()> {
    if hook.validation.is_empty() {
        anyhow::bail!("No validation token given: pass --validation or set CERTBOT_VALIDATION");
    }

    let fqdn = hook.fqdn();
    println!("{} {}", "Creating challenge record".yellow(), fqdn.cyan());

    let authenticator = hook.authenticator()?;
    if authenticator
        .perform(&hook.domain, &fqdn, &hook.validation)
        .await?
    {
        println!("  ✓ Record submitted");
    } else {
        println!("  {}", "Record creation failed, see log".red());
    }

    if propagation_seconds > 0 {
        tracing::info!("Waiting {}s for DNS propagation", propagation_seconds);
        tokio::time::sleep(Duration::from_secs(propagation_seconds)).await;
    }

    Ok(())
}
