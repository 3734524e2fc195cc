use anyhow::Result;
use commentscope_engine::{MatchMode, UrlValidator};
use commentscope_runtime::Config;

pub fn handle(config: &Config, url: &str, strict: bool) -> Result<()> {
    let mode = if strict {
        MatchMode::Strict
    } else {
        config.match_mode()
    };

    match UrlValidator::new(mode).validate(url) {
        Ok(valid) => {
            println!("{}", valid.video_id());
            Ok(())
        }
        Err(err) => anyhow::bail!("{}", err),
    }
}
