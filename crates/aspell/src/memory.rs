// In-process backend.
//
// Implements the backend seam without libaspell so the configuration and
// lifecycle rules can be exercised anywhere: a fixed configuration schema
// with typed values, word lists registered per language code, personal word
// list files in the `personal_ws-1.1` format, and suggestions ranked by edit
// distance with a breadth that follows `sug-mode`. It is a test double, not a
// spelling engine: there is no affix handling, soundslike folding or
// run-together splitting.
//
// Every handle it creates is counted in a shared `Ledger`, which is how the
// tests observe that each handle is released exactly once.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hashbrown::{HashMap, HashSet};

use aspell_core::keys::{
    KEY_DICT_DIR, KEY_ENCODING, KEY_HOME_DIR, KEY_IGNORE, KEY_IGNORE_CASE, KEY_JARGON, KEY_LANG,
    KEY_MASTER, KEY_PERSONAL, KEY_RUN_TOGETHER, KEY_SIZE, KEY_SUG_MODE,
};
use aspell_core::{AspellError, Codec, DictionaryInfo, Result, SuggestionMode};

use crate::backend::{Backend, RawChecker, RawConfig, RawEnumeration};

/// Header line that opens a personal word list file.
const PERSONAL_HEADER: &str = "personal_ws-1.1";

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Text,
    Boolean,
    Integer,
}

struct SchemaEntry {
    key: &'static str,
    kind: ValueKind,
    default: &'static str,
}

const SCHEMA: &[SchemaEntry] = &[
    SchemaEntry { key: KEY_LANG, kind: ValueKind::Text, default: "en_US" },
    SchemaEntry { key: KEY_PERSONAL, kind: ValueKind::Text, default: ".aspell.en_US.pws" },
    SchemaEntry { key: KEY_ENCODING, kind: ValueKind::Text, default: "utf-8" },
    SchemaEntry { key: KEY_SUG_MODE, kind: ValueKind::Text, default: "normal" },
    SchemaEntry { key: KEY_MASTER, kind: ValueKind::Text, default: "" },
    SchemaEntry { key: KEY_JARGON, kind: ValueKind::Text, default: "" },
    SchemaEntry { key: KEY_SIZE, kind: ValueKind::Text, default: "+60" },
    SchemaEntry { key: KEY_IGNORE, kind: ValueKind::Integer, default: "1" },
    SchemaEntry { key: KEY_IGNORE_CASE, kind: ValueKind::Boolean, default: "false" },
    SchemaEntry { key: KEY_RUN_TOGETHER, kind: ValueKind::Boolean, default: "false" },
    SchemaEntry { key: KEY_DICT_DIR, kind: ValueKind::Text, default: "/usr/lib/aspell" },
    SchemaEntry { key: KEY_HOME_DIR, kind: ValueKind::Text, default: "" },
];

fn schema_entry(key: &str) -> Option<&'static SchemaEntry> {
    SCHEMA.iter().find(|entry| entry.key == key)
}

fn validate(entry: &SchemaEntry, value: &str) -> std::result::Result<(), String> {
    match entry.kind {
        ValueKind::Text => Ok(()),
        ValueKind::Boolean if matches!(value, "true" | "false") => Ok(()),
        ValueKind::Boolean => Err(format!("\"{value}\" is not a valid boolean value.")),
        ValueKind::Integer if value.parse::<i64>().is_ok() => Ok(()),
        ValueKind::Integer => Err(format!("The value \"{value}\" is not a number.")),
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Kind of handle tracked by the [`Ledger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Config,
    Checker,
    Enumeration,
}

#[derive(Debug, Default)]
struct Counter {
    created: AtomicUsize,
    released: AtomicUsize,
}

/// Creation and release counts for every handle a [`MemoryBackend`] issued.
#[derive(Debug, Default)]
pub struct Ledger {
    configs: Counter,
    checkers: Counter,
    enumerations: Counter,
}

impl Ledger {
    fn counter(&self, resource: Resource) -> &Counter {
        match resource {
            Resource::Config => &self.configs,
            Resource::Checker => &self.checkers,
            Resource::Enumeration => &self.enumerations,
        }
    }

    fn acquire(&self, resource: Resource) {
        self.counter(resource).created.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self, resource: Resource) {
        self.counter(resource).released.fetch_add(1, Ordering::SeqCst);
    }

    pub fn created(&self, resource: Resource) -> usize {
        self.counter(resource).created.load(Ordering::SeqCst)
    }

    pub fn released(&self, resource: Resource) -> usize {
        self.counter(resource).released.load(Ordering::SeqCst)
    }

    /// Handles of this kind created but not yet released.
    pub fn live(&self, resource: Resource) -> usize {
        self.created(resource) - self.released(resource)
    }

    /// Whether every handle of every kind has been released.
    pub fn is_balanced(&self) -> bool {
        [Resource::Config, Resource::Checker, Resource::Enumeration]
            .into_iter()
            .all(|resource| self.live(resource) == 0)
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct WordList {
    code: String,
    words: Vec<String>,
    index: HashSet<String>,
}

/// Backend serving registered word lists from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    dictionaries: Vec<Arc<WordList>>,
    rejected: Vec<String>,
    ledger: Arc<Ledger>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the word list for language `code`; replaces an earlier
    /// registration of the same code. Word order is the suggestion tie-break.
    pub fn with_dictionary<I, S>(mut self, code: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let index = words.iter().cloned().collect();
        let list = Arc::new(WordList {
            code: code.to_string(),
            words,
            index,
        });
        match self.dictionaries.iter_mut().find(|d| d.code == code) {
            Some(existing) => *existing = list,
            None => self.dictionaries.push(list),
        }
        self
    }

    /// Make checker creation fail for `code`, like a dictionary whose data
    /// files are missing or corrupt.
    pub fn rejecting(mut self, code: &str) -> Self {
        self.rejected.push(code.to_string());
        self
    }

    /// Shared handle to the ledger; stays valid after the backend is moved
    /// into a speller.
    pub fn ledger(&self) -> Arc<Ledger> {
        Arc::clone(&self.ledger)
    }

    fn dictionary(&self, language: &str) -> Option<&Arc<WordList>> {
        self.dictionaries.iter().find(|d| d.code == language)
    }
}

impl Backend for MemoryBackend {
    type Config = MemoryConfig;
    type Checker = MemoryChecker;

    fn new_config(&self) -> Result<MemoryConfig> {
        self.ledger.acquire(Resource::Config);
        Ok(MemoryConfig {
            values: HashMap::new(),
            ledger: Arc::clone(&self.ledger),
        })
    }

    fn new_checker(&self, config: &MemoryConfig) -> Result<MemoryChecker> {
        let language = config.value(KEY_LANG).to_string();
        if self.rejected.contains(&language) {
            return Err(AspellError::native(
                "new_aspell_speller",
                format!("No word lists can be found for the language \"{language}\"."),
            ));
        }
        let codec = Codec::from_name(config.value(KEY_ENCODING))
            .map_err(|err| AspellError::native("new_aspell_speller", err.to_string()))?;
        let mode = config
            .value(KEY_SUG_MODE)
            .parse::<SuggestionMode>()
            .map_err(|err| AspellError::native("new_aspell_speller", err.to_string()))?;

        let personal_path = personal_path(config.value(KEY_PERSONAL), config.value(KEY_HOME_DIR));
        let personal = match &personal_path {
            Some(path) => load_personal(path)?,
            None => Vec::new(),
        };

        let checker = MemoryChecker {
            language: language.clone(),
            main: self.dictionary(&language).cloned(),
            personal,
            personal_path,
            session: Vec::new(),
            replacements: Vec::new(),
            codec,
            mode,
            ignore_len: config.value(KEY_IGNORE).parse().unwrap_or(0),
            ignore_case: config.value(KEY_IGNORE_CASE) == "true",
            ledger: Arc::clone(&self.ledger),
        };
        self.ledger.acquire(Resource::Checker);
        Ok(checker)
    }

    fn dictionaries(&self, _config: &MemoryConfig) -> Result<Vec<DictionaryInfo>> {
        Ok(self
            .dictionaries
            .iter()
            .map(|d| DictionaryInfo::for_code(d.code.as_str()))
            .collect())
    }
}

fn personal_path(personal: &str, home_dir: &str) -> Option<PathBuf> {
    if personal.is_empty() {
        return None;
    }
    let path = Path::new(personal);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else if !home_dir.is_empty() {
        Some(Path::new(home_dir).join(path))
    } else {
        None
    }
}

fn load_personal(path: &Path) -> Result<Vec<String>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(AspellError::native(
                "new_aspell_speller",
                format!("{}: {err}", path.display()),
            ));
        }
    };
    Ok(contents
        .lines()
        .filter(|line| !line.starts_with(PERSONAL_HEADER))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration handle issued by [`MemoryBackend`].
#[derive(Debug)]
pub struct MemoryConfig {
    values: HashMap<&'static str, String>,
    ledger: Arc<Ledger>,
}

impl MemoryConfig {
    /// Current value of a key known to the schema.
    fn value(&self, key: &'static str) -> &str {
        self.values
            .get(key)
            .map(String::as_str)
            .or_else(|| schema_entry(key).map(|entry| entry.default))
            .unwrap_or("")
    }
}

impl RawConfig for MemoryConfig {
    fn retrieve(&self, key: &CStr) -> Option<String> {
        let entry = schema_entry(key.to_str().ok()?)?;
        Some(self.value(entry.key).to_string())
    }

    fn retrieve_default(&self, key: &CStr) -> Option<String> {
        let entry = schema_entry(key.to_str().ok()?)?;
        Some(entry.default.to_string())
    }

    fn replace(&mut self, key: &CStr, value: &CStr) -> std::result::Result<(), String> {
        let key = key.to_string_lossy();
        let entry = schema_entry(&key).ok_or_else(|| format!("The key \"{key}\" is unknown."))?;
        let value = value
            .to_str()
            .map_err(|_| format!("The value for \"{key}\" is not valid UTF-8."))?;
        validate(entry, value)?;
        self.values.insert(entry.key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &CStr) -> bool {
        let Some(entry) = key.to_str().ok().and_then(schema_entry) else {
            return false;
        };
        self.values.remove(entry.key);
        true
    }
}

impl Drop for MemoryConfig {
    fn drop(&mut self) {
        self.ledger.release(Resource::Config);
    }
}

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

/// Checker handle issued by [`MemoryBackend`].
#[derive(Debug)]
pub struct MemoryChecker {
    language: String,
    /// `None` when no word list is registered for `language`.
    main: Option<Arc<WordList>>,
    personal: Vec<String>,
    personal_path: Option<PathBuf>,
    session: Vec<String>,
    replacements: Vec<(String, String)>,
    codec: Codec,
    mode: SuggestionMode,
    ignore_len: usize,
    ignore_case: bool,
    ledger: Arc<Ledger>,
}

impl MemoryChecker {
    fn known_words(&self) -> impl Iterator<Item = &String> {
        self.main
            .iter()
            .flat_map(|list| list.words.iter())
            .chain(self.personal.iter())
            .chain(self.session.iter())
    }

    fn knows(&self, word: &str) -> bool {
        if self.ignore_case {
            let lowered = word.to_lowercase();
            return self.known_words().any(|known| known.to_lowercase() == lowered);
        }
        self.main
            .as_ref()
            .is_some_and(|list| list.index.contains(word))
            || self.personal.iter().any(|known| known == word)
            || self.session.iter().any(|known| known == word)
    }

    /// Largest edit distance considered, and an optional cap on results.
    fn breadth(&self) -> (usize, Option<usize>) {
        match self.mode {
            SuggestionMode::Ultra => (1, Some(5)),
            SuggestionMode::Fast => (1, None),
            SuggestionMode::Normal => (2, None),
            SuggestionMode::BadSpellers => (3, None),
        }
    }

    fn rank(&self, word: &str) -> Vec<String> {
        let (max_distance, limit) = self.breadth();

        let mut ranked: Vec<(usize, &String)> = self
            .known_words()
            .filter_map(|known| {
                let distance = strsim::damerau_levenshtein(word, known);
                (distance <= max_distance).then_some((distance, known))
            })
            .collect();
        // Stable, so ties keep word list order.
        ranked.sort_by_key(|(distance, _)| *distance);

        let mut seen = HashSet::new();
        let replacements = self
            .replacements
            .iter()
            .filter(|(misspelled, _)| misspelled == word)
            .map(|(_, correct)| correct);
        replacements
            .chain(ranked.into_iter().map(|(_, known)| known))
            .filter(|candidate| seen.insert(candidate.as_str()))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    fn write_personal(&self, path: &Path) -> std::io::Result<()> {
        let mut contents = format!(
            "{PERSONAL_HEADER} {} {}\n",
            self.language,
            self.personal.len()
        );
        for word in &self.personal {
            contents.push_str(word);
            contents.push('\n');
        }
        std::fs::write(path, contents)
    }
}

impl RawChecker for MemoryChecker {
    type Enumeration<'a> = MemoryEnumeration<'a>;

    fn check(&self, word: &[u8]) -> Result<bool> {
        let word = self.codec.decode(word)?;
        Ok(word.chars().count() <= self.ignore_len || self.knows(&word))
    }

    fn suggest(&mut self, word: &[u8]) -> Result<MemoryEnumeration<'_>> {
        let word = self.codec.decode(word)?;
        let items = self
            .rank(&word)
            .into_iter()
            // Words the configured encoding cannot carry are not offered.
            .filter_map(|candidate| self.codec.encode(&candidate).ok().map(|b| b.into_owned()))
            .collect();
        self.ledger.acquire(Resource::Enumeration);
        Ok(MemoryEnumeration {
            items,
            ledger: Arc::clone(&self.ledger),
            _checker: PhantomData,
        })
    }

    fn add_to_personal(&mut self, word: &[u8]) -> Result<()> {
        let word = self.codec.decode(word)?;
        if !self.personal.contains(&word) {
            self.personal.push(word);
        }
        Ok(())
    }

    fn add_to_session(&mut self, word: &[u8]) -> Result<()> {
        let word = self.codec.decode(word)?;
        if !self.session.contains(&word) {
            self.session.push(word);
        }
        Ok(())
    }

    fn clear_session(&mut self) -> Result<()> {
        self.session.clear();
        Ok(())
    }

    /// Writes the personal list when `personal` resolves to a path; a
    /// relative `personal` with an empty `home-dir` keeps it in memory only.
    fn save_all_word_lists(&mut self) -> Result<()> {
        let Some(path) = &self.personal_path else {
            return Ok(());
        };
        self.write_personal(path).map_err(|err| {
            AspellError::native(
                "aspell_speller_save_all_word_lists",
                format!("{}: {err}", path.display()),
            )
        })
    }

    fn store_replacement(&mut self, misspelled: &[u8], correct: &[u8]) -> Result<()> {
        let misspelled = self.codec.decode(misspelled)?;
        let correct = self.codec.decode(correct)?;
        self.replacements.push((misspelled, correct));
        Ok(())
    }
}

impl Drop for MemoryChecker {
    fn drop(&mut self) {
        self.ledger.release(Resource::Checker);
    }
}

/// Suggestion enumeration issued by [`MemoryChecker::suggest`].
#[derive(Debug)]
pub struct MemoryEnumeration<'a> {
    items: std::collections::VecDeque<Vec<u8>>,
    ledger: Arc<Ledger>,
    _checker: PhantomData<&'a mut MemoryChecker>,
}

impl RawEnumeration for MemoryEnumeration<'_> {
    fn next_element(&mut self) -> Option<Vec<u8>> {
        self.items.pop_front()
    }
}

impl Drop for MemoryEnumeration<'_> {
    fn drop(&mut self) {
        self.ledger.release(Resource::Enumeration);
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use super::*;

    fn c(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_dictionary("en_US", ["cookie", "cooked", "cook", "house"])
            .with_dictionary("nl", ["huis", "koekje"])
    }

    fn suggestions(checker: &mut MemoryChecker, word: &str) -> Vec<String> {
        let mut enumeration = checker.suggest(word.as_bytes()).unwrap();
        let mut out = Vec::new();
        while let Some(bytes) = enumeration.next_element() {
            out.push(String::from_utf8(bytes).unwrap());
        }
        out
    }

    #[test]
    fn schema_defaults() {
        let config = backend().new_config().unwrap();
        assert_eq!(config.retrieve(&c("lang")).as_deref(), Some("en_US"));
        assert_eq!(config.retrieve_default(&c("sug-mode")).as_deref(), Some("normal"));
        assert_eq!(config.retrieve(&c("nope")), None);
    }

    #[test]
    fn typed_values_are_validated() {
        let mut config = backend().new_config().unwrap();
        assert!(config.replace(&c("ignore"), &c("3")).is_ok());
        assert!(config.replace(&c("ignore"), &c("three")).is_err());
        assert!(config.replace(&c("run-together"), &c("yes")).is_err());
        assert_eq!(config.retrieve(&c("ignore")).as_deref(), Some("3"));
    }

    #[test]
    fn remove_restores_default() {
        let mut config = backend().new_config().unwrap();
        config.replace(&c("lang"), &c("nl")).unwrap();
        assert!(config.remove(&c("lang")));
        assert_eq!(config.retrieve(&c("lang")).as_deref(), Some("en_US"));
        assert!(!config.remove(&c("nope")));
    }

    #[test]
    fn checker_snapshot_ignores_later_changes() {
        let backend = backend();
        let mut config = backend.new_config().unwrap();
        let checker = backend.new_checker(&config).unwrap();
        config.replace(&c("lang"), &c("nl")).unwrap();
        assert!(checker.check(b"house").unwrap());
        assert!(!checker.check(b"huis").unwrap());
    }

    #[test]
    fn ignore_length_accepts_short_words() {
        let backend = backend();
        let config = backend.new_config().unwrap();
        let checker = backend.new_checker(&config).unwrap();
        assert!(checker.check(b"x").unwrap());
        assert!(!checker.check(b"xy").unwrap());
    }

    #[test]
    fn ignore_case() {
        let backend = backend();
        let mut config = backend.new_config().unwrap();
        config.replace(&c("ignore-case"), &c("true")).unwrap();
        let checker = backend.new_checker(&config).unwrap();
        assert!(checker.check(b"COOKIE").unwrap());
    }

    #[test]
    fn ranking_orders_by_distance_then_list_order() {
        let backend = backend();
        let config = backend.new_config().unwrap();
        let mut checker = backend.new_checker(&config).unwrap();
        assert_eq!(suggestions(&mut checker, "cookei"), ["cookie", "cooked", "cook"]);
    }

    #[test]
    fn breadth_follows_mode() {
        let backend = backend();
        let mut config = backend.new_config().unwrap();
        config.replace(&c("sug-mode"), &c("fast")).unwrap();
        let mut fast = backend.new_checker(&config).unwrap();
        config.replace(&c("sug-mode"), &c("bad-spellers")).unwrap();
        let mut bad = backend.new_checker(&config).unwrap();
        assert!(suggestions(&mut bad, "cookei").len() >= suggestions(&mut fast, "cookei").len());
    }

    #[test]
    fn replacements_come_first() {
        let backend = backend();
        let config = backend.new_config().unwrap();
        let mut checker = backend.new_checker(&config).unwrap();
        checker.store_replacement(b"cokie", b"cook").unwrap();
        assert_eq!(suggestions(&mut checker, "cokie")[0], "cook");
    }

    #[test]
    fn rejected_language_fails_creation() {
        let backend = backend().rejecting("nl");
        let mut config = backend.new_config().unwrap();
        config.replace(&c("lang"), &c("nl")).unwrap();
        let err = backend.new_checker(&config).unwrap_err();
        assert!(matches!(err, AspellError::Native { operation: "new_aspell_speller", .. }));
        assert_eq!(backend.ledger().created(Resource::Checker), 0);
    }

    #[test]
    fn ledger_tracks_every_handle() {
        let backend = backend();
        let ledger = backend.ledger();
        {
            let config = backend.new_config().unwrap();
            let mut checker = backend.new_checker(&config).unwrap();
            let _ = suggestions(&mut checker, "cook");
            assert_eq!(ledger.live(Resource::Config), 1);
            assert_eq!(ledger.live(Resource::Checker), 1);
            assert_eq!(ledger.live(Resource::Enumeration), 0);
        }
        assert!(ledger.is_balanced());
        assert_eq!(ledger.created(Resource::Enumeration), 1);
    }

    #[test]
    fn personal_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personal.pws");
        let backend = backend();
        let mut config = backend.new_config().unwrap();
        config
            .replace(&c("personal"), &c(path.to_str().unwrap()))
            .unwrap();

        let mut checker = backend.new_checker(&config).unwrap();
        assert!(!checker.check(b"github").unwrap());
        checker.add_to_personal(b"github").unwrap();
        checker.save_all_word_lists().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "personal_ws-1.1 en_US 1\ngithub\n");
        let reloaded = backend.new_checker(&config).unwrap();
        assert!(reloaded.check(b"github").unwrap());
    }
}
