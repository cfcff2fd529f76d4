use super::{Correspondence, Label, Problem, Query};
use crate::Point;
use winnow::{
    Result as WResult,
    ascii::{alphanumeric1, line_ending, multispace0, space0},
    combinator::{delimited, eof, opt, separated},
    prelude::*,
};

pub fn parse_problem(i: &mut &str) -> WResult<Problem> {
    multispace0.parse_next(i)?;
    correspondences_header.parse_next(i)?;
    let correspondences: Vec<_> =
        separated(1.., Correspondence::parse, line_ending).parse_next(i)?;
    multispace0.parse_next(i)?;
    let queries = opt(apply_section).parse_next(i)?.unwrap_or_default();
    multispace0.parse_next(i)?;
    eof.parse_next(i)?;
    Ok(Problem {
        correspondences,
        queries,
    })
}

fn correspondences_header(i: &mut &str) -> WResult<()> {
    ('#', space0, "correspondences", space0, line_ending)
        .map(|_| ())
        .parse_next(i)
}

fn apply_header(i: &mut &str) -> WResult<()> {
    ('#', space0, "apply", space0, line_ending)
        .map(|_| ())
        .parse_next(i)
}

fn apply_section(i: &mut &str) -> WResult<Vec<Query>> {
    apply_header.parse_next(i)?;
    separated(1.., Query::parse, line_ending).parse_next(i)
}

impl Correspondence {
    // a (0, 0) -> (1, 2)
    fn parse(i: &mut &str) -> WResult<Self> {
        ignore_ws(i);
        let label = Label::parse(i)?;
        ws.parse_next(i)?;
        let from = parse_point(i)?;
        arrow.parse_next(i)?;
        let to = parse_point(i)?;
        ignore_ws(i);
        Ok(Self { label, from, to })
    }
}

impl Query {
    // m (0.5, 0.5)
    fn parse(i: &mut &str) -> WResult<Self> {
        ignore_ws(i);
        let label = Label::parse(i)?;
        ws.parse_next(i)?;
        let point = parse_point(i)?;
        ignore_ws(i);
        Ok(Self { label, point })
    }
}

fn arrow(i: &mut &str) -> WResult<()> {
    (space0, "->", space0).map(|_| ()).parse_next(i)
}

fn ws(i: &mut &str) -> WResult<()> {
    space0.parse_next(i).map(|_| ())
}

fn ignore_ws(i: &mut &str) {
    let _ = ws.parse_next(i);
}

impl Label {
    fn parse(i: &mut &str) -> WResult<Label> {
        alphanumeric1
            .map(|s: &str| Label(s.to_owned()))
            .parse_next(i)
    }
}

fn parse_point(i: &mut &str) -> WResult<Point> {
    delimited(
        '(',
        (space0, parse_number, space0, ',', space0, parse_number, space0)
            .map(|(_, x, _, _comma, _, y, _)| Point { x, y }),
        ')',
    )
    .parse_next(i)
}

fn parse_number(i: &mut &str) -> WResult<f64> {
    winnow::ascii::float
        .verify(|x: &f64| x.is_finite())
        .parse_next(i)
}
