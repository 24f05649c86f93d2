//! # Parsing Utilities
//!
//! Small `nom` combinators shared by the tokenizer, the checksum codec and the
//! time/date field parsers.

use nom::{
    AsChar, Err, Input, Mode, OutputMode, PResult, Parser,
    bytes::complete::take,
    error::{ErrorKind, ParseError},
};

/// Ensures that the parser consumes all input.
///
/// Fails with the error kind `e` if any input is left over once `f` succeeded.
pub(crate) fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    Consumed { f, e }
}

/// Takes exactly `count` decimal digits and converts them to a `u32`.
pub(crate) fn fixed_digits<I, E>(count: usize) -> impl Parser<I, Output = u32, Error = E>
where
    I: Input + Clone,
    <I as Input>::Item: AsChar,
    E: ParseError<I>,
{
    take(count).and_then(consumed(nom::character::complete::u32, ErrorKind::Digit))
}

struct Consumed<F> {
    f: F,
    e: ErrorKind,
}

impl<I, F> Parser<I> for Consumed<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, self.e)
            })));
        }

        Ok((i, o))
    }
}
