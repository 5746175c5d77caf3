use std::io::{self, Write};

use crate::merge::Aggregate;

/// Writes `{name=min/mean/max, ...}` followed by a newline, names ascending.
pub fn write_report(aggregate: Aggregate, mut out: impl Write) -> io::Result<()> {
    write!(out, "{{")?;
    for (idx, (name, stats)) in aggregate.into_sorted().into_iter().enumerate() {
        if idx > 0 {
            write!(out, ", ")?;
        }
        out.write_all(&name)?;
        write!(out, "={stats}")?;
    }
    writeln!(out, "}}")
}

/// The report as a string, names decoded lossily.
pub fn render(aggregate: Aggregate) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec can't fail.
    let _ = write_report(aggregate, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{merge::merge, worker::scan};

    fn report(input: &[u8]) -> String {
        render(merge([scan(input, 0..input.len(), 16).unwrap()], 16).unwrap())
    }

    #[test]
    fn sorted_single_line() {
        assert_eq!(
            report(b"Hamburg;12.0\nHamburg;14.0\nBerlin;5.3\n"),
            "{Berlin=5.3/5.3/5.3, Hamburg=12.0/13.0/14.0}\n"
        );
    }

    #[test]
    fn negative_readings() {
        assert_eq!(report(b"Oslo;-3.4\nOslo;-1.0\n"), "{Oslo=-3.4/-2.2/-1.0}\n");
    }

    #[test]
    fn byte_order_of_names() {
        assert_eq!(
            report("b;1.0\nB;1.0\nÅ;1.0\na;1.0\n".as_bytes()),
            "{B=1.0/1.0/1.0, a=1.0/1.0/1.0, b=1.0/1.0/1.0, Å=1.0/1.0/1.0}\n"
        );
    }

    #[test]
    fn empty_report() {
        assert_eq!(report(b""), "{}\n");
    }
}
