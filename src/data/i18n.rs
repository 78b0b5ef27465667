use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

/// UI languages, in toggle rotation order.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Fr,
    Pt,
}

impl Language {
    /// Parses a stored language code. Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "en" => Language::En,
            "fr" => Language::Fr,
            "pt" => Language::Pt,
            _ => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Pt => "pt",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::Pt,
            Language::Pt => Language::En,
        }
    }

    /// Label for the language toggle: the code of the language it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self.cycle() {
            Language::En => "EN",
            Language::Fr => "FR",
            Language::Pt => "PT",
        }
    }

    fn index(self) -> usize {
        match self {
            Language::En => 0,
            Language::Fr => 1,
            Language::Pt => 2,
        }
    }
}

// key -> [en, fr, pt]
const TRANSLATIONS: &[(&str, [&str; 3])] = &[
    (
        "title",
        [
            "Hello, how are you feeling today?",
            "Bonjour, comment allez-vous aujourd'hui?",
            "Ola, como voce esta se sentindo hoje?",
        ],
    ),
    ("yearTitle", ["Year", "Annee", "Ano"]),
    ("daysLogged", ["days logged", "jours enregistres", "dias registrados"]),
    ("dayStreak", ["streak", "serie", "sequencia"]),
    ("back", ["Back", "Retour", "Voltar"]),
    ("settings", ["Settings", "Parametres", "Configuracoes"]),
    ("language", ["Language", "Langue", "Idioma"]),
    ("today", ["Today", "Aujourd'hui", "Hoje"]),
    ("template", ["Theme", "Theme", "Tema"]),
    ("logged", ["Logged", "Enregistre", "Registrado"]),
    ("notLogged", ["Not logged yet", "Pas encore enregistre", "Ainda nao registrado"]),
    ("helpMood", ["log mood", "humeur", "humor"]),
    ("helpNavigate", ["navigate", "naviguer", "navegar"]),
    ("helpView", ["view", "vue", "visao"]),
    ("helpCounter", ["counter", "compteur", "contador"]),
    ("helpReset", ["today", "aujourd'hui", "hoje"]),
    ("helpQuit", ["quit", "quitter", "sair"]),
];

/// Looks up a UI string. Falls back to English, then to the key itself.
pub fn t<'a>(key: &'a str, language: Language) -> &'a str {
    match TRANSLATIONS.iter().find(|(k, _)| *k == key) {
        Some((_, values)) => {
            let value = values[language.index()];
            if value.is_empty() { values[0] } else { value }
        }
        None => key,
    }
}

const MONTHS: [[&str; 12]; 3] = [
    [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    [
        "Janvier", "Fevrier", "Mars", "Avril", "Mai", "Juin", "Juillet", "Aout", "Septembre",
        "Octobre", "Novembre", "Decembre",
    ],
    [
        "Janeiro", "Fevereiro", "Marco", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
        "Outubro", "Novembro", "Dezembro",
    ],
];

const SHORT_MONTHS: [[&str; 12]; 3] = [
    [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    [
        "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.",
        "dez.",
    ],
];

// Monday first.
const WEEKDAY_ABBREVIATIONS: [[&str; 7]; 3] = [
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    ["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"],
    ["Seg", "Ter", "Qua", "Qui", "Sex", "Sab", "Dom"],
];

const WEEKDAY_NAMES: [[&str; 7]; 3] = [
    [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
    [
        "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
    ],
    [
        "Segunda", "Terca", "Quarta", "Quinta", "Sexta", "Sabado", "Domingo",
    ],
];

/// Full month name for a 1-based month. Out-of-range months return "".
pub fn month_name(month: u32, language: Language) -> &'static str {
    match month {
        1..=12 => MONTHS[language.index()][(month - 1) as usize],
        _ => "",
    }
}

pub fn short_month_name(month: u32, language: Language) -> &'static str {
    match month {
        1..=12 => SHORT_MONTHS[language.index()][(month - 1) as usize],
        _ => "",
    }
}

pub fn weekday_abbreviations(language: Language) -> [&'static str; 7] {
    WEEKDAY_ABBREVIATIONS[language.index()]
}

pub fn weekday_name(date: NaiveDate, language: Language) -> &'static str {
    WEEKDAY_NAMES[language.index()][date.weekday().num_days_from_monday() as usize]
}
