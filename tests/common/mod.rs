// tests/common/mod.rs

//! Shared fixture: an in-memory history index modeled on a small
//! definition repository with versioned histories and cross-references.

use chrono::{DateTime, TimeZone, Utc};
use defman::{Context, Core, MemorySource, Paths};
use std::path::Path;

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// jquery has three revisions (1.7/1.8/1.9) and references sizzle; chai
/// is standalone; mocha references chai with a range constraint.
pub fn fixture_source() -> MemorySource {
    let mut source = MemorySource::new();
    source
        .add(
            "jquery",
            "jquery/jquery.d.ts",
            Some("1.7.0"),
            "1111aaaa1111aaaa",
            Some(date(2013, 2, 10)),
            "// Type definitions for jQuery 1.7\n\
             // Project: http://jquery.com/\n\
             // Definitions by: Boris Yankov <https://github.com/borisyankov/>\n\
             /// <reference path=\"../sizzle/sizzle.d.ts\" />\n\
             interface JQuery { v17; }\n",
        )
        .add(
            "jquery",
            "jquery/jquery.d.ts",
            Some("1.8.0"),
            "2222bbbb2222bbbb",
            Some(date(2013, 12, 1)),
            "// Type definitions for jQuery 1.8\n\
             // Project: http://jquery.com/\n\
             /// <reference path=\"../sizzle/sizzle.d.ts\" />\n\
             interface JQuery { v18; }\n",
        )
        .add(
            "jquery",
            "jquery/jquery.d.ts",
            Some("1.9.0"),
            "3333cccc3333cccc",
            Some(date(2014, 3, 1)),
            "// Type definitions for jQuery 1.9\n\
             // Project: http://jquery.com/\n\
             /// <reference path=\"../sizzle/sizzle.d.ts\" />\n\
             interface JQuery { v19; }\n",
        )
        .add(
            "sizzle",
            "sizzle/sizzle.d.ts",
            None,
            "4444dddd4444dddd",
            Some(date(2014, 1, 15)),
            "interface Sizzle {}\n",
        )
        .add(
            "chai",
            "chai/chai.d.ts",
            Some("1.9.0"),
            "5555eeee5555eeee",
            Some(date(2014, 2, 1)),
            "declare var chai;\n",
        )
        .add(
            "chai",
            "chai/chai.d.ts",
            Some("2.0.0"),
            "6666ffff6666ffff",
            Some(date(2014, 8, 1)),
            "declare var chai2;\n",
        )
        .add(
            "mocha",
            "mocha/mocha.d.ts",
            Some("1.0.0"),
            "7777abab7777abab",
            Some(date(2014, 5, 1)),
            "/// <reference path=\"../chai/chai.d.ts\" version=\"<2.0\" />\n\
             declare function describe();\n",
        );
    source
}

pub fn core_at(root: &Path) -> Core<MemorySource> {
    let context = Context::new(Paths::under(root)).unwrap();
    Core::new(fixture_source(), context)
}
