//! # Sentence Type Registry
//!
//! Maps sentence ids to constructors of typed sentence views.
//!
//! Every registered sentence type supplies two construction paths:
//! - *decode*: build the view from a raw line, verifying the sentence id;
//! - *encode*: build an empty view from a talker id, ready to be filled in.
//!
//! An entry may also *wrap* a sentence the caller already decoded, which lets
//! [`SentenceRegistry::create_parser_with`] honour the caller's [`SentenceDecoder`]
//! without tokenizing the line twice.
//!
//! A [`SentenceRegistry`] is an explicit value that can be passed to whatever decodes
//! sentences. [`SentenceRegistry::global`] offers a process-wide instance seeded with
//! the built-in sentence types.
//!
//! ```rust
//! use nmea0183_sentence::{SentenceRegistry, sentences::GGA};
//!
//! let registry = SentenceRegistry::with_builtins();
//! let view = registry
//!     .create_parser("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79")
//!     .unwrap();
//!
//! let gga = view.downcast_ref::<GGA>().unwrap();
//! assert_eq!(gga.satellites_in_use().unwrap(), 0);
//! ```

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::{debug, trace};
use once_cell::sync::Lazy;

use crate::{
    BeginChar, Error, Result, Sentence, SentenceDecoder, TalkerId,
    sentence::validate_sentence_id,
    sentences::{self, AisSentence},
};

/// A typed view over a [`Sentence`], as produced by the registry.
pub trait SentenceView: fmt::Debug + Send + Sync + Any {
    /// Returns the underlying generic sentence.
    fn sentence(&self) -> &Sentence;

    /// Returns the underlying generic sentence for in-place edits.
    fn sentence_mut(&mut self) -> &mut Sentence;

    /// Unwraps the underlying generic sentence.
    fn into_sentence(self: Box<Self>) -> Sentence;

    fn as_any(&self) -> &dyn Any;
}

impl dyn SentenceView {
    /// Returns the concrete view if it is of type `T`.
    pub fn downcast_ref<T: SentenceView>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Whether the concrete view is of type `T`.
    pub fn is<T: SentenceView>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl SentenceView for Sentence {
    fn sentence(&self) -> &Sentence {
        self
    }

    fn sentence_mut(&mut self) -> &mut Sentence {
        self
    }

    fn into_sentence(self: Box<Self>) -> Sentence {
        *self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A concrete sentence type with a fixed id and field layout.
///
/// Implementors only wrap a [`Sentence`]: the provided methods take care of id
/// verification and empty-sentence construction.
pub trait SentenceKind: SentenceView + Sized {
    /// Sentence id the type is registered under.
    const SENTENCE_ID: &'static str;

    /// Number of fields of an empty sentence of this type.
    const FIELD_COUNT: usize;

    /// Begin character of an empty sentence of this type.
    const BEGIN_CHAR: BeginChar = BeginChar::Standard;

    /// Wraps a sentence whose id has already been verified.
    fn from_sentence_unchecked(sentence: Sentence) -> Self;

    /// Whether the type can represent sentences with this id.
    fn accepts(sentence_id: &str) -> bool {
        sentence_id == Self::SENTENCE_ID
    }

    /// Wraps a generic sentence.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedSentenceId`] if the type does not accept the sentence id.
    fn try_from_sentence(sentence: Sentence) -> Result<Self> {
        if !Self::accepts(sentence.sentence_id()) {
            return Err(Error::UnexpectedSentenceId {
                expected: Self::SENTENCE_ID,
                found: sentence.sentence_id().to_string(),
            });
        }

        Ok(Self::from_sentence_unchecked(sentence))
    }

    /// Decodes a raw line with the default decoder.
    ///
    /// # Errors
    ///
    /// Tokenizer errors, or [`Error::UnexpectedSentenceId`] on another sentence type.
    fn parse(line: &str) -> Result<Self> {
        Self::try_from_sentence(Sentence::parse(line)?)
    }

    /// Creates an empty sentence under one of the accepted ids.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedSentenceId`] if the id is not accepted.
    fn create(talker_id: TalkerId, sentence_id: &str) -> Result<Self> {
        if !Self::accepts(sentence_id) {
            return Err(Error::UnexpectedSentenceId {
                expected: Self::SENTENCE_ID,
                found: sentence_id.to_string(),
            });
        }

        Sentence::new(Self::BEGIN_CHAR, talker_id, sentence_id, Self::FIELD_COUNT)
            .map(Self::from_sentence_unchecked)
    }

    /// Creates an empty sentence of this type.
    fn new(talker_id: TalkerId) -> Result<Self> {
        Self::create(talker_id, Self::SENTENCE_ID)
    }
}

type DecodeFn = dyn Fn(&str) -> Result<Box<dyn SentenceView>> + Send + Sync;
type EncodeFn = dyn Fn(TalkerId, &str) -> Result<Box<dyn SentenceView>> + Send + Sync;
type WrapFn = dyn Fn(Sentence) -> Result<Box<dyn SentenceView>> + Send + Sync;

/// The pair of constructors registered for one or more sentence ids.
///
/// ```rust
/// use nmea0183_sentence::{BeginChar, ParserEntry, Sentence, SentenceRegistry, TalkerId};
///
/// let entry = ParserEntry::new()
///     .decode(|line| Ok(Box::new(Sentence::parse(line)?)))
///     .encode(|talker_id, sentence_id| {
///         Ok(Box::new(Sentence::new(BeginChar::Standard, talker_id, sentence_id, 6)?))
///     });
///
/// let registry = SentenceRegistry::empty();
/// registry.register("GRME", entry).unwrap();
/// assert!(registry.has("GRME"));
///
/// let view = registry.create_empty(TalkerId::Proprietary, "GRME").unwrap();
/// assert_eq!(view.sentence().address(), "PGRME");
/// assert_eq!(view.sentence().field_count(), 6);
/// ```
#[must_use]
#[derive(Default)]
pub struct ParserEntry {
    decode: Option<Box<DecodeFn>>,
    encode: Option<Box<EncodeFn>>,
    wrap: Option<Box<WrapFn>>,
    origin: Option<TypeId>,
}

impl ParserEntry {
    /// Creates an entry without constructors.
    pub fn new() -> Self {
        ParserEntry::default()
    }

    /// Creates the entry of a [`SentenceKind`].
    ///
    /// Entries built from the same kind are considered identical by
    /// [`SentenceRegistry::unregister`].
    pub fn of<T: SentenceKind>() -> Self {
        ParserEntry {
            decode: Some(Box::new(|line: &str| -> Result<Box<dyn SentenceView>> {
                Ok(Box::new(T::parse(line)?))
            })),
            encode: Some(Box::new(
                |talker_id: TalkerId, sentence_id: &str| -> Result<Box<dyn SentenceView>> {
                    Ok(Box::new(T::create(talker_id, sentence_id)?))
                },
            )),
            wrap: Some(Box::new(|sentence: Sentence| -> Result<Box<dyn SentenceView>> {
                Ok(Box::new(T::try_from_sentence(sentence)?))
            })),
            origin: Some(TypeId::of::<T>()),
        }
    }

    /// Sets the decode constructor.
    pub fn decode<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Box<dyn SentenceView>> + Send + Sync + 'static,
    {
        self.decode = Some(Box::new(f));
        self
    }

    /// Sets the encode constructor.
    pub fn encode<F>(mut self, f: F) -> Self
    where
        F: Fn(TalkerId, &str) -> Result<Box<dyn SentenceView>> + Send + Sync + 'static,
    {
        self.encode = Some(Box::new(f));
        self
    }

    /// Sets the constructor from an already decoded sentence. Optional: without it
    /// the decode constructor receives the raw line.
    pub fn wrap<F>(mut self, f: F) -> Self
    where
        F: Fn(Sentence) -> Result<Box<dyn SentenceView>> + Send + Sync + 'static,
    {
        self.wrap = Some(Box::new(f));
        self
    }

    fn is_complete(&self) -> bool {
        self.decode.is_some() && self.encode.is_some()
    }

    fn is_same(&self, other: &ParserEntry) -> bool {
        std::ptr::eq(self, other) || (self.origin.is_some() && self.origin == other.origin)
    }
}

impl fmt::Debug for ParserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserEntry")
            .field("decode", &self.decode.is_some())
            .field("encode", &self.encode.is_some())
            .field("wrap", &self.wrap.is_some())
            .field("origin", &self.origin)
            .finish()
    }
}

/// Argument of a registry dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct<'a> {
    /// Decode the given raw line.
    Decode(&'a str),
    /// Create an empty sentence for the given talker.
    Encode(TalkerId),
}

/// Thread-safe map from sentence id to [`ParserEntry`].
///
/// Lookups and registrations may happen concurrently from several threads; a
/// registration covering several ids becomes visible all at once.
pub struct SentenceRegistry {
    entries: RwLock<HashMap<String, Arc<ParserEntry>>>,
}

static GLOBAL: Lazy<SentenceRegistry> = Lazy::new(SentenceRegistry::with_builtins);

impl SentenceRegistry {
    /// Creates a registry without any entry.
    pub fn empty() -> Self {
        SentenceRegistry {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry holding the built-in sentence types.
    pub fn with_builtins() -> Self {
        SentenceRegistry {
            entries: RwLock::new(builtin_entries()),
        }
    }

    /// Returns the process-wide registry, seeded with the built-in sentence types on
    /// first use.
    pub fn global() -> &'static SentenceRegistry {
        &GLOBAL
    }

    /// Registers `entry` under `sentence_id`, replacing any previous mapping.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidExtension`] if the entry lacks a constructor or the id is not a
    /// valid sentence id.
    pub fn register(&self, sentence_id: &str, entry: ParserEntry) -> Result<Arc<ParserEntry>> {
        self.register_shared(&[sentence_id], entry)
    }

    /// Registers one entry under several ids at once.
    ///
    /// # Errors
    ///
    /// See [`SentenceRegistry::register`]. Nothing is registered on error.
    pub fn register_shared(
        &self,
        sentence_ids: &[&str],
        entry: ParserEntry,
    ) -> Result<Arc<ParserEntry>> {
        if !entry.is_complete() {
            return Err(Error::InvalidExtension(format!(
                "{sentence_ids:?}: both decode and encode constructors are required"
            )));
        }

        if sentence_ids.is_empty() {
            return Err(Error::InvalidExtension("no sentence id given".to_string()));
        }

        for id in sentence_ids {
            validate_sentence_id(TalkerId::Proprietary, id)
                .map_err(|_| Error::InvalidExtension(format!("invalid sentence id {id:?}")))?;
        }

        let entry = Arc::new(entry);
        let mut entries = self.write();

        for id in sentence_ids {
            match entries.insert(id.to_string(), Arc::clone(&entry)) {
                Some(_) => debug!("replaced parser for {id}"),
                None => debug!("registered parser for {id}"),
            }
        }

        Ok(entry)
    }

    /// Registers a [`SentenceKind`] under its own id.
    ///
    /// # Errors
    ///
    /// See [`SentenceRegistry::register`].
    pub fn register_kind<T: SentenceKind>(&self) -> Result<Arc<ParserEntry>> {
        self.register(T::SENTENCE_ID, ParserEntry::of::<T>())
    }

    /// Removes every id mapped to `entry` (or to an entry of the same kind) and returns
    /// how many were removed.
    pub fn unregister(&self, entry: &ParserEntry) -> usize {
        let mut entries = self.write();
        let before = entries.len();

        entries.retain(|id, registered| {
            let remove = registered.is_same(entry);
            if remove {
                debug!("unregistered parser for {id}");
            }
            !remove
        });

        before - entries.len()
    }

    /// Whether a parser is registered for the id.
    pub fn has(&self, sentence_id: &str) -> bool {
        self.read().contains_key(sentence_id)
    }

    /// Returns the registered ids in alphabetical order.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Invokes the constructor registered for `sentence_id`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSentenceType`] if nothing is registered for the id.
    /// - [`Error::ConstructionFailed`] wrapping the error of the constructor.
    pub fn dispatch(&self, sentence_id: &str, arg: Construct<'_>) -> Result<Box<dyn SentenceView>> {
        let entry = self.entry(sentence_id)?;
        trace!("dispatching {arg:?} to parser for {sentence_id}");

        let result = match (arg, &entry.decode, &entry.encode) {
            (Construct::Decode(line), Some(decode), _) => decode(line),
            (Construct::Encode(talker_id), _, Some(encode)) => encode(talker_id, sentence_id),
            _ => Err(Error::InvalidExtension(format!(
                "{sentence_id}: missing constructor"
            ))),
        };

        result.map_err(|source| construction_failed(sentence_id, source))
    }

    /// Decodes a raw line with the default decoder into the view registered for its
    /// sentence id.
    ///
    /// # Errors
    ///
    /// Tokenizer errors, plus the errors of [`SentenceRegistry::dispatch`].
    pub fn create_parser(&self, line: &str) -> Result<Box<dyn SentenceView>> {
        self.create_parser_with(&SentenceDecoder::new(), line)
    }

    /// Decodes a raw line with `decoder` into the view registered for its sentence id.
    ///
    /// ```rust
    /// use nmea0183_sentence::{ChecksumMode, Error, SentenceDecoder, SentenceRegistry};
    ///
    /// let strict = SentenceDecoder::new().checksum_mode(ChecksumMode::Required);
    /// let registry = SentenceRegistry::with_builtins();
    ///
    /// assert!(registry.create_parser_with(&strict, "$GPDPT,,,*7B").is_ok());
    /// assert_eq!(
    ///     registry.create_parser_with(&strict, "$GPDPT,,,").unwrap_err(),
    ///     Error::MissingChecksum
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Errors of [`SentenceDecoder::decode`], plus the errors of
    /// [`SentenceRegistry::dispatch`].
    pub fn create_parser_with(
        &self,
        decoder: &SentenceDecoder,
        line: &str,
    ) -> Result<Box<dyn SentenceView>> {
        let sentence = decoder.decode(line)?;
        let sentence_id = sentence.sentence_id().to_string();

        let entry = self.entry(&sentence_id)?;
        trace!("decoding {line:?} with parser for {sentence_id}");

        let result = match (&entry.wrap, &entry.decode) {
            (Some(wrap), _) => wrap(sentence),
            (None, Some(decode)) => decode(line),
            (None, None) => Err(Error::InvalidExtension(format!(
                "{sentence_id}: missing constructor"
            ))),
        };

        result.map_err(|source| construction_failed(&sentence_id, source))
    }

    /// Creates an empty view for the given talker and sentence id.
    ///
    /// # Errors
    ///
    /// See [`SentenceRegistry::dispatch`].
    pub fn create_empty(
        &self,
        talker_id: TalkerId,
        sentence_id: &str,
    ) -> Result<Box<dyn SentenceView>> {
        self.dispatch(sentence_id, Construct::Encode(talker_id))
    }

    /// Drops all custom registrations and restores the built-in sentence types.
    pub fn reset(&self) {
        *self.write() = builtin_entries();
        debug!("restored built-in parsers");
    }

    // constructors run without holding the lock
    fn entry(&self, sentence_id: &str) -> Result<Arc<ParserEntry>> {
        self.read()
            .get(sentence_id)
            .cloned()
            .ok_or_else(|| Error::UnknownSentenceType(sentence_id.to_string()))
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<ParserEntry>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<ParserEntry>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SentenceRegistry {
    fn default() -> Self {
        SentenceRegistry::with_builtins()
    }
}

impl fmt::Debug for SentenceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

fn construction_failed(sentence_id: &str, source: Error) -> Error {
    Error::ConstructionFailed {
        id: sentence_id.to_string(),
        source: Box::new(source),
    }
}

fn builtin_entries() -> HashMap<String, Arc<ParserEntry>> {
    fn kind<T: SentenceKind>() -> (&'static str, Arc<ParserEntry>) {
        (T::SENTENCE_ID, Arc::new(ParserEntry::of::<T>()))
    }

    let mut entries: HashMap<String, Arc<ParserEntry>> = [
        kind::<sentences::BOD>(),
        kind::<sentences::DBT>(),
        kind::<sentences::DPT>(),
        kind::<sentences::GGA>(),
        kind::<sentences::GLL>(),
        kind::<sentences::RMC>(),
        kind::<sentences::VTG>(),
        kind::<sentences::XDR>(),
        kind::<sentences::ZDA>(),
    ]
    .into_iter()
    .map(|(id, entry)| (id.to_string(), entry))
    .collect();

    // VDM and VDO share one envelope type
    let ais = Arc::new(ParserEntry::of::<AisSentence>());
    for id in AisSentence::SENTENCE_IDS {
        entries.insert(id.to_string(), Arc::clone(&ais));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ChecksumMode, LineEndingMode,
        sentences::{BOD, GGA},
    };

    fn custom_entry(field_count: usize) -> ParserEntry {
        ParserEntry::new()
            .decode(|line| Ok(Box::new(Sentence::parse(line)?)))
            .encode(move |talker_id, sentence_id| {
                Ok(Box::new(Sentence::new(
                    BeginChar::Standard,
                    talker_id,
                    sentence_id,
                    field_count,
                )?))
            })
    }

    #[test]
    fn test_builtins() {
        let registry = SentenceRegistry::with_builtins();
        assert_eq!(
            registry.ids(),
            ["BOD", "DBT", "DPT", "GGA", "GLL", "RMC", "VDM", "VDO", "VTG", "XDR", "ZDA"]
        );
        assert!(!SentenceRegistry::empty().has("GGA"));
        assert!(SentenceRegistry::global().has("GGA"));
    }

    #[test]
    fn test_dispatch() {
        let registry = SentenceRegistry::with_builtins();

        let view = registry
            .dispatch("BOD", Construct::Decode("$GPBOD,234.9,T,228.8,M,RUSKI,*1D"))
            .unwrap();
        assert!(view.is::<BOD>());
        assert_eq!(view.sentence().talker_id(), TalkerId::GP);

        let view = registry.dispatch("GGA", Construct::Encode(TalkerId::GN)).unwrap();
        let gga = view.downcast_ref::<GGA>().unwrap();
        assert_eq!(gga.sentence().field_count(), 14);
        assert_eq!(gga.sentence().address(), "GNGGA");

        let view = registry.create_empty(TalkerId::AI, "VDO").unwrap();
        assert_eq!(view.sentence().sentence_id(), "VDO");
        assert_eq!(view.sentence().begin_char(), BeginChar::Encapsulated);
    }

    #[test]
    fn test_dispatch_errors() {
        let registry = SentenceRegistry::with_builtins();

        assert_eq!(
            registry.dispatch("ABC", Construct::Encode(TalkerId::GP)).unwrap_err(),
            Error::UnknownSentenceType("ABC".to_string())
        );

        // a GGA constructor fed with a BOD line
        let error = registry
            .dispatch("GGA", Construct::Decode("$GPBOD,234.9,T,228.8,M,RUSKI,*1D"))
            .unwrap_err();
        match error {
            Error::ConstructionFailed { id, source } => {
                assert_eq!(id, "GGA");
                assert!(matches!(*source, Error::UnexpectedSentenceId { expected: "GGA", .. }));
            }
            e => panic!("unexpected error: {e:?}"),
        }

        assert!(matches!(
            registry.create_parser("$GPBOD,234.9,T,228.8,M,RUSKI,*1E"),
            Err(Error::ChecksumMismatch { .. })
        ));
        assert!(matches!(
            registry.create_parser("$PGRME,15.0,M,45.0,M,25.0,M*1C"),
            Err(Error::UnknownSentenceType(_))
        ));
    }

    #[test]
    fn test_create_parser_with_strict_decoder() {
        let registry = SentenceRegistry::with_builtins();
        let strict = SentenceDecoder::new()
            .checksum_mode(ChecksumMode::Required)
            .line_ending_mode(LineEndingMode::Required);

        assert!(registry.create_parser("$GPBOD,234.9,T,228.8,M,RUSKI,").unwrap().is::<BOD>());
        let without_checksum = "$GPBOD,234.9,T,228.8,M,RUSKI,\r\n";
        assert_eq!(
            registry.create_parser_with(&strict, without_checksum).unwrap_err(),
            Error::MissingChecksum
        );
        assert!(matches!(
            registry.create_parser_with(&strict, "$GPBOD,234.9,T,228.8,M,RUSKI,*1D"),
            Err(Error::InvalidSentenceFormat(_))
        ));

        let view = registry
            .create_parser_with(&strict, "$GPBOD,234.9,T,228.8,M,RUSKI,*1D\r\n")
            .unwrap();
        assert!(view.is::<BOD>());
    }

    #[test]
    fn test_wrap_constructor() {
        let registry = SentenceRegistry::empty();
        let strict = SentenceDecoder::new().checksum_mode(ChecksumMode::Required);

        // the decode constructor would accept anything, the decoder still applies
        registry
            .register(
                "DPT",
                custom_entry(3).wrap(|sentence| {
                    Err(Error::InvalidExtension(format!("wrapped {}", sentence.address())))
                }),
            )
            .unwrap();

        assert_eq!(
            registry.create_parser_with(&strict, "$GPDPT,,,").unwrap_err(),
            Error::MissingChecksum
        );
        match registry.create_parser_with(&strict, "$GPDPT,,,*7B").unwrap_err() {
            Error::ConstructionFailed { id, source } => {
                assert_eq!(id, "DPT");
                assert_eq!(*source, Error::InvalidExtension("wrapped GPDPT".to_string()));
            }
            e => panic!("unexpected error: {e:?}"),
        }
    }

    #[test]
    fn test_register_requires_both_constructors() {
        let registry = SentenceRegistry::empty();

        let decode_only = ParserEntry::new().decode(|line| Ok(Box::new(Sentence::parse(line)?)));
        assert!(matches!(
            registry.register("ABC", decode_only),
            Err(Error::InvalidExtension(_))
        ));
        assert!(matches!(
            registry.register("ABC", ParserEntry::new()),
            Err(Error::InvalidExtension(_))
        ));
        assert!(matches!(
            registry.register("ab", custom_entry(1)),
            Err(Error::InvalidExtension(_))
        ));
        assert!(matches!(
            registry.register_shared(&[], custom_entry(1)),
            Err(Error::InvalidExtension(_))
        ));
        assert!(registry.ids().is_empty());
    }

    #[test]
    fn test_override_and_unregister() {
        let registry = SentenceRegistry::with_builtins();

        let entry = registry.register("GGA", custom_entry(2)).unwrap();
        let view = registry.create_empty(TalkerId::GP, "GGA").unwrap();
        assert!(!view.is::<GGA>());
        assert_eq!(view.sentence().field_count(), 2);

        assert_eq!(registry.unregister(&entry), 1);
        assert!(!registry.has("GGA"));
        assert_eq!(registry.unregister(&entry), 0);

        registry.reset();
        assert!(registry.has("GGA"));
        assert!(registry.create_empty(TalkerId::GP, "GGA").unwrap().is::<GGA>());
    }

    #[test]
    fn test_unregister_shared_entry() {
        let registry = SentenceRegistry::with_builtins();

        // removing the envelope kind removes every id it serves
        assert_eq!(registry.unregister(&ParserEntry::of::<AisSentence>()), 2);
        assert!(!registry.has("VDM"));
        assert!(!registry.has("VDO"));
        assert!(registry.has("GGA"));

        let entry = registry.register_shared(&["ABC", "ABD"], custom_entry(1)).unwrap();
        assert!(registry.has("ABC") && registry.has("ABD"));

        // overriding one id leaves the other one mapped to the shared entry
        registry.register("ABD", custom_entry(2)).unwrap();
        assert_eq!(registry.unregister(&entry), 1);
        assert!(!registry.has("ABC"));
        assert!(registry.has("ABD"));
    }

    #[test]
    fn test_concurrent_lookups() {
        let registry = Arc::new(SentenceRegistry::with_builtins());

        let handles: Vec<_> = (0..4)
            .map(|n| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        if n == 0 {
                            registry.register("ABC", custom_entry(1)).unwrap();
                        }
                        assert!(registry.create_empty(TalkerId::GP, "GGA").is_ok());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(registry.has("ABC"));
    }
}
