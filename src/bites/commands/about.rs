use crate::commands::CmdResult;

const SUMMARY: &str = "The Personal Restaurant Guide helps you manage your favorite \
restaurants, rate them, and share details with your friends.";

const TEAM: &str = "Ian McDonald, Sebastian Varon, Nikola Varicak";

pub fn version() -> String {
    let hash = env!("BITES_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{} ({})", env!("CARGO_PKG_VERSION"), hash)
    }
}

pub fn run() -> CmdResult {
    let mut result = CmdResult::default();
    result.text = Some(format!(
        "About This App\n{}\n\nTeam\n{}\n\nbites {}",
        SUMMARY,
        TEAM,
        version()
    ));
    result
}
