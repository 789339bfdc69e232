/// Numeric conversion and formatting helpers.
///
/// Integers and reals meet in arithmetic, in repetition counts and in
/// printed output; the conversions between them live here so the rules are
/// applied the same way everywhere.
pub mod num;
