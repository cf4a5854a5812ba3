//! Streaming extraction of attendance intervals from XML.
//!
//! The extractor is a pull iterator over a `BufRead`. It walks the document
//! event by event, holding only the record currently open, and validates
//! structure and chronology before releasing each interval:
//!
//! ```text
//! <people>
//!   <person full_name="ivan">
//!     <start>21-12-2011 10:00:00</start>
//!     <end>21-12-2011 12:00:00</end>
//!   </person>
//! </people>
//! ```

use std::fmt::Display;
use std::io::BufRead;

use chrono::NaiveDateTime;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ExtractError;
use crate::interval::AttendanceInterval;
use crate::source::AttendanceSource;
use crate::timestamp::parse_timestamp;

/// Attribute on `person` that names the employee.
const NAME_ATTRIBUTE: &str = "full_name";

/// Reads `<people>` documents through [`AttendanceExtractor`].
#[derive(Debug)]
pub struct XmlAttendanceSource<R> {
    input: R,
    pattern: String,
}

impl<R: BufRead> XmlAttendanceSource<R> {
    /// Creates a source reading `input` and parsing `start`/`end` values with
    /// the strftime-style `pattern`.
    pub fn new(input: R, pattern: impl Into<String>) -> Self {
        Self {
            input,
            pattern: pattern.into(),
        }
    }
}

impl<R: BufRead> AttendanceSource for XmlAttendanceSource<R> {
    type Intervals = AttendanceExtractor<R>;

    fn read_attendance(self) -> Self::Intervals {
        AttendanceExtractor::new(self.input, self.pattern)
    }
}

/// The four elements that carry meaning; everything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    People,
    Person,
    Start,
    End,
}

impl Tag {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"people" => Some(Self::People),
            b"person" => Some(Self::Person),
            b"start" => Some(Self::Start),
            b"end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Which timestamp of the open record is being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Start,
    End,
}

/// The `person` element currently open.
#[derive(Debug)]
struct OpenRecord {
    name: String,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    capturing: Option<Field>,
}

impl OpenRecord {
    const fn new(name: String) -> Self {
        Self {
            name,
            start: None,
            end: None,
            capturing: None,
        }
    }
}

#[derive(Debug)]
enum State {
    /// Waiting for `<people>`.
    Outside,
    /// Between records, waiting for `<person>` or `</people>`.
    InPeople,
    /// Inside a `<person>`.
    InPerson(OpenRecord),
    /// `</people>` was seen or an error was reported.
    Finished,
}

/// Owned summary of one markup event, detached from the read buffer.
#[derive(Debug)]
enum Signal {
    Enter(Tag),
    EnterPerson(Option<String>),
    Exit(Tag),
    Eof,
    Skip,
}

/// Outcome of applying one signal to the state machine.
enum Step {
    Continue,
    Emit(AttendanceInterval),
    Finish,
}

/// Lazy, validating iterator over the intervals of a `<people>` document.
///
/// Yields `Ok` for every closed `person`, then `None` after `</people>`. The
/// first error is yielded once and the iterator is fused afterwards.
pub struct AttendanceExtractor<R> {
    reader: Reader<R>,
    pattern: String,
    buf: Vec<u8>,
    text: String,
    state: State,
    emitted: usize,
}

impl<R: BufRead> AttendanceExtractor<R> {
    pub fn new(input: R, pattern: impl Into<String>) -> Self {
        let mut reader = Reader::from_reader(input);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = true;

        Self {
            reader,
            pattern: pattern.into(),
            buf: Vec::new(),
            text: String::new(),
            state: State::Outside,
            emitted: 0,
        }
    }

    /// Reads events until a record is complete, the document ends, or
    /// something is rejected.
    fn advance(&mut self) -> Result<Option<AttendanceInterval>, ExtractError> {
        loop {
            let signal = self.read_signal()?;
            match self.apply(signal)? {
                Step::Continue => {}
                Step::Emit(interval) => return Ok(Some(interval)),
                Step::Finish => return Ok(None),
            }
        }
    }

    fn read_signal(&mut self) -> Result<Signal, ExtractError> {
        let capturing = matches!(
            self.state,
            State::InPerson(OpenRecord {
                capturing: Some(_),
                ..
            })
        );

        self.buf.clear();
        let signal = match self.reader.read_event_into(&mut self.buf) {
            Ok(Event::Start(start)) => match Tag::from_name(start.name().as_ref()) {
                Some(Tag::Person) => Signal::EnterPerson(
                    person_name(&start).map_err(|reason| syntax(&self.reader, reason))?,
                ),
                Some(tag) => Signal::Enter(tag),
                None => Signal::Skip,
            },
            Ok(Event::End(end)) => Tag::from_name(end.name().as_ref()).map_or(Signal::Skip, Signal::Exit),
            Ok(Event::Text(text)) => {
                if capturing {
                    let unescaped = text.unescape().map_err(|e| syntax(&self.reader, e))?;
                    self.text.push_str(&unescaped);
                }
                Signal::Skip
            }
            Ok(Event::CData(data)) => {
                if capturing {
                    let decoded = self
                        .reader
                        .decoder()
                        .decode(&data)
                        .map_err(|e| syntax(&self.reader, e))?;
                    self.text.push_str(&decoded);
                }
                Signal::Skip
            }
            Ok(Event::Eof) => Signal::Eof,
            Ok(_) => Signal::Skip,
            Err(quick_xml::Error::Io(err)) => return Err(ExtractError::Io(err)),
            Err(err) => return Err(syntax(&self.reader, err)),
        };
        Ok(signal)
    }

    fn apply(&mut self, signal: Signal) -> Result<Step, ExtractError> {
        let state = std::mem::replace(&mut self.state, State::Finished);
        self.state = match (state, signal) {
            (State::Outside, Signal::Enter(Tag::People)) => {
                tracing::trace!("entered <people>");
                State::InPeople
            }
            (_, Signal::Enter(Tag::People)) => {
                return Err(syntax(&self.reader, "nested <people> element"));
            }
            (State::InPeople, Signal::EnterPerson(name)) => {
                let name = name
                    .filter(|name| !name.is_empty())
                    .ok_or(ExtractError::MissingEmployeeName)?;
                tracing::trace!(%name, "entered <person>");
                State::InPerson(OpenRecord::new(name))
            }
            (State::InPerson(_), Signal::EnterPerson(_)) => {
                return Err(syntax(&self.reader, "nested <person> element"));
            }
            (State::InPerson(mut record), Signal::Enter(tag @ (Tag::Start | Tag::End))) => {
                record.capturing = Some(if tag == Tag::Start {
                    Field::Start
                } else {
                    Field::End
                });
                self.text.clear();
                State::InPerson(record)
            }
            (State::InPerson(mut record), Signal::Exit(Tag::Start | Tag::End)) => {
                if let Some(field) = record.capturing.take() {
                    let parsed = parse_timestamp(&self.text, &self.pattern)?;
                    tracing::trace!(?field, %parsed, "captured timestamp");
                    match field {
                        Field::Start => record.start = Some(parsed),
                        Field::End => record.end = Some(parsed),
                    }
                }
                State::InPerson(record)
            }
            (State::InPerson(record), Signal::Exit(Tag::Person)) => {
                let (Some(start), Some(end)) = (record.start, record.end) else {
                    return Err(ExtractError::IncompleteRecord);
                };
                let interval = AttendanceInterval::new(record.name, start, end)?;
                self.emitted += 1;
                self.state = State::InPeople;
                return Ok(Step::Emit(interval));
            }
            (State::InPeople, Signal::Exit(Tag::People)) => {
                tracing::debug!(records = self.emitted, "reached </people>");
                return Ok(Step::Finish);
            }
            (_, Signal::Eof) => {
                return Err(syntax(&self.reader, "input ended before </people>"));
            }
            (state, _) => state,
        };
        Ok(Step::Continue)
    }
}

impl<R: BufRead> Iterator for AttendanceExtractor<R> {
    type Item = Result<AttendanceInterval, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, State::Finished) {
            return None;
        }
        match self.advance() {
            Ok(Some(interval)) => Some(Ok(interval)),
            Ok(None) => {
                self.state = State::Finished;
                None
            }
            Err(err) => {
                tracing::debug!(error = %err, records = self.emitted, "extraction failed");
                self.state = State::Finished;
                Some(Err(err))
            }
        }
    }
}

/// Reads the employee name off a `person` start tag.
fn person_name(start: &BytesStart<'_>) -> Result<Option<String>, String> {
    let Some(attribute) = start
        .try_get_attribute(NAME_ATTRIBUTE)
        .map_err(|e| e.to_string())?
    else {
        return Ok(None);
    };
    let value = attribute.unescape_value().map_err(|e| e.to_string())?;
    Ok(Some(value.into_owned()))
}

fn syntax<R>(reader: &Reader<R>, reason: impl Display) -> ExtractError {
    ExtractError::StreamSyntax {
        position: u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX),
        reason: reason.to_string(),
    }
}
