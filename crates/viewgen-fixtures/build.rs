// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generates `OUT_DIR/views.rs` from the annotated model.

use std::{env, fs, path::PathBuf};

use viewgen::{Generator, GeneratorConfig, MemorySink, SourceModel};

const MODEL: &str = "src/model.rs";
const CONFIG: &str = "viewgen.toml";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(viewgen)");
    println!("cargo::rerun-if-changed={MODEL}");
    println!("cargo::rerun-if-changed={CONFIG}");

    let config = GeneratorConfig::load(CONFIG).unwrap_or_else(|err| panic!("{err}"));
    let source = fs::read_to_string(MODEL).unwrap_or_else(|err| panic!("{MODEL}: {err}"));
    let model = SourceModel::from_source("crate::model", &source, &config)
        .unwrap_or_else(|err| panic!("{MODEL}: {err}"));

    let sink = MemorySink::new();
    let report = Generator::new(model.graph(), &config).run(model.requests(), &sink);
    for warning in &report.warnings {
        println!("cargo::warning={warning}");
    }
    if !report.is_success() {
        for failure in &report.failures {
            println!("cargo::warning={failure}");
        }
        panic!("{} view(s) failed to generate", report.failures.len());
    }

    let out = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo")).join("views.rs");
    fs::write(&out, sink.module_source()).unwrap_or_else(|err| panic!("{}: {err}", out.display()));
}
