use serde::Serialize;

/// A league the scanner produces analyses for.
///
/// The provider exposes hundreds of competitions; most have history too thin
/// for the form model to say anything useful, so coverage is a fixed
/// whitelist of leagues with deep, reliable result feeds.
#[derive(Debug, Clone, Serialize)]
pub struct League {
    pub key: &'static str,
    pub name: &'static str,
    pub country: &'static str,
}

pub const TRACKED_LEAGUES: &[League] = &[
    League { key: "premier-league", name: "Premier League", country: "England" },
    League { key: "championship", name: "Championship", country: "England" },
    League { key: "la-liga", name: "La Liga", country: "Spain" },
    League { key: "serie-a", name: "Serie A", country: "Italy" },
    League { key: "bundesliga", name: "Bundesliga", country: "Germany" },
    League { key: "ligue-1", name: "Ligue 1", country: "France" },
    League { key: "eredivisie", name: "Eredivisie", country: "Netherlands" },
    League { key: "primeira-liga", name: "Primeira Liga", country: "Portugal" },
];

pub fn find(key: &str) -> Option<&'static League> {
    TRACKED_LEAGUES.iter().find(|l| l.key == key)
}

pub fn is_tracked(key: &str) -> bool {
    find(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_league_is_found() {
        assert!(is_tracked("premier-league"));
        assert_eq!(find("serie-a").unwrap().country, "Italy");
    }

    #[test]
    fn unknown_league_is_not_tracked() {
        assert!(!is_tracked("mls"));
        assert!(find("").is_none());
    }

    #[test]
    fn league_keys_are_unique() {
        for (i, a) in TRACKED_LEAGUES.iter().enumerate() {
            for b in &TRACKED_LEAGUES[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
