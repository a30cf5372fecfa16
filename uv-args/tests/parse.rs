//! End-to-end parses against a realistic argument set.
//!
//! The fixture mirrors the shape of a place-and-route tool's command line:
//! two required positionals, toggle flags, on/off options, numeric options,
//! and a choice-constrained option, parsed repeatedly through one parser.

use pretty_assertions::assert_eq;
use uv_args::{
    ArgParser, ArgRef, ArgSpec, ArgsError, FloatConvert, IntConvert, OnOffConvert, ShowIn,
    StringConvert,
};

struct Flow {
    architecture: ArgRef<String>,
    circuit: ArgRef<String>,
    pack: ArgRef<bool>,
    disp: ArgRef<bool>,
    timing_analysis: ArgRef<bool>,
    route_chan_width: ArgRef<i64>,
    criticality_exp: ArgRef<f64>,
    route_type: ArgRef<String>,
}

impl Flow {
    fn new() -> Self {
        Self {
            architecture: ArgRef::new(String::new()),
            circuit: ArgRef::new(String::new()),
            pack: ArgRef::new(false),
            disp: ArgRef::new(false),
            timing_analysis: ArgRef::new(false),
            route_chan_width: ArgRef::new(0),
            criticality_exp: ArgRef::new(0.0),
            route_type: ArgRef::new(String::new()),
        }
    }
}

fn flow_parser() -> (ArgParser, Flow) {
    let flow = Flow::new();
    let mut parser = ArgParser::new("vpr").description("Pack, place and route a circuit");

    parser
        .register(
            ArgSpec::positional("architecture", &flow.architecture, StringConvert)
                .help("Architecture description file"),
        )
        .unwrap();
    parser
        .register(ArgSpec::positional("circuit", &flow.circuit, StringConvert).help("Circuit file"))
        .unwrap();
    parser
        .register(
            ArgSpec::flag("--pack", &flow.pack, OnOffConvert)
                .default_value("off")
                .help("Run packing"),
        )
        .unwrap();
    parser
        .register(
            ArgSpec::option("--disp", &flow.disp, OnOffConvert)
                .default_value("off")
                .help("Enable interactive graphics"),
        )
        .unwrap();
    parser
        .register(
            ArgSpec::option("--timing_analysis", &flow.timing_analysis, OnOffConvert)
                .default_value("on")
                .help("Enable timing analysis"),
        )
        .unwrap();
    parser
        .register(
            ArgSpec::option("--route_chan_width", &flow.route_chan_width, IntConvert)
                .default_value("100")
                .metavar("CHANNEL_WIDTH")
                .help("Fixed channel width to route at"),
        )
        .unwrap();
    parser
        .register(
            ArgSpec::option("--criticality_exp", &flow.criticality_exp, FloatConvert)
                .default_value("1.0")
                .show_in(ShowIn::HelpOnly)
                .help("Criticality exponent for timing-driven routing"),
        )
        .unwrap();
    parser
        .register(
            ArgSpec::option("--route_type", &flow.route_type, StringConvert)
                .choices(["global", "detailed"])
                .default_value("detailed")
                .help("Routing stage to perform"),
        )
        .unwrap();

    (parser, flow)
}

#[test]
fn positionals_bind_and_defaults_fill_the_rest() {
    let (parser, flow) = flow_parser();
    let report = parser.parse(&["my_arch.xml", "my_circuit.blif"]).unwrap();

    assert_eq!(flow.architecture.get(), "my_arch.xml");
    assert_eq!(flow.circuit.get(), "my_circuit.blif");
    assert!(!flow.pack.get());
    assert!(flow.timing_analysis.get());
    assert_eq!(flow.route_chan_width.get(), 100);
    assert_eq!(flow.criticality_exp.get(), 1.0);
    assert_eq!(flow.route_type.get(), "detailed");

    assert!(report.supplied("architecture"));
    assert!(report.supplied("circuit"));
    assert!(!report.supplied("--pack"));
    assert!(!report.supplied("--route_chan_width"));
}

#[test]
fn a_flag_stores_true_without_consuming_a_value() {
    let (parser, flow) = flow_parser();
    let report = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--pack"])
        .unwrap();

    assert!(flow.pack.get());
    assert!(report.supplied("--pack"));
}

#[test]
fn on_off_options_take_explicit_values() {
    let (parser, flow) = flow_parser();
    parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--timing_analysis", "on"])
        .unwrap();
    assert!(flow.timing_analysis.get());

    parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--timing_analysis", "off"])
        .unwrap();
    assert!(!flow.timing_analysis.get());
}

#[test]
fn integer_options_bind_integral_forms() {
    let (parser, flow) = flow_parser();
    parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--route_chan_width", "300"])
        .unwrap();
    assert_eq!(flow.route_chan_width.get(), 300);
}

#[test]
fn integer_options_reject_fractional_forms() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--route_chan_width", "300.5"])
        .unwrap_err();
    assert_eq!(
        err,
        ArgsError::Conversion {
            name: "--route_chan_width".to_string(),
            value: "300.5".to_string(),
            message: "Invalid conversion from '300.5' to integer".to_string(),
        }
    );
}

#[test]
fn float_options_accept_integral_and_fractional_forms() {
    let (parser, flow) = flow_parser();
    parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--criticality_exp", "2"])
        .unwrap();
    let from_integral = flow.criticality_exp.get();

    parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--criticality_exp", "2.0"])
        .unwrap();
    assert_eq!(from_integral, flow.criticality_exp.get());
    assert_eq!(flow.criticality_exp.get(), 2.0);
}

#[test]
fn float_options_reject_textual_values() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--criticality_exp", "on"])
        .unwrap_err();
    assert!(matches!(err, ArgsError::Conversion { .. }));
}

#[test]
fn each_missing_required_positional_fails() {
    let (parser, _flow) = flow_parser();

    let err = parser.parse::<&str>(&[]).unwrap_err();
    assert_eq!(err, ArgsError::MissingArgument("architecture".to_string()));

    let err = parser.parse(&["my_arch.xml"]).unwrap_err();
    assert_eq!(err, ArgsError::MissingArgument("circuit".to_string()));
}

#[test]
fn surplus_positional_tokens_fail() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "extra"])
        .unwrap_err();
    assert_eq!(err, ArgsError::ExtraPositional("extra".to_string()));
}

#[test]
fn an_option_at_end_of_line_is_missing_its_value() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--route_chan_width"])
        .unwrap_err();
    assert_eq!(err, ArgsError::MissingValue("--route_chan_width".to_string()));
}

#[test]
fn a_value_after_a_flag_overflows_the_positionals() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--pack", "on"])
        .unwrap_err();
    assert_eq!(err, ArgsError::ExtraPositional("on".to_string()));
}

#[test]
fn a_surplus_option_value_overflows_the_positionals() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--route_chan_width", "300", "5"])
        .unwrap_err();
    assert_eq!(err, ArgsError::ExtraPositional("5".to_string()));
}

#[test]
fn boolean_options_reject_values_outside_the_domain() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--disp", "132"])
        .unwrap_err();
    assert_eq!(
        err,
        ArgsError::Conversion {
            name: "--disp".to_string(),
            value: "132".to_string(),
            message: "Invalid conversion from '132' to boolean (expected one of: on, off)"
                .to_string(),
        }
    );
}

#[test]
fn integer_options_reject_boolean_spellings() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--route_chan_width", "off"])
        .unwrap_err();
    assert!(matches!(err, ArgsError::Conversion { .. }));
}

#[test]
fn declared_choice_sets_reject_convertible_strays() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--route_type", "express"])
        .unwrap_err();
    assert_eq!(
        err,
        ArgsError::InvalidChoice {
            name: "--route_type".to_string(),
            value: "express".to_string(),
            choices: "global, detailed".to_string(),
        }
    );
}

#[test]
fn unknown_options_fail() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--fastmath"])
        .unwrap_err();
    assert_eq!(err, ArgsError::UnknownOption("--fastmath".to_string()));
}

#[test]
fn parsing_is_idempotent_across_invocations() {
    let line = ["my_arch.xml", "my_circuit.blif", "--route_chan_width", "300", "--pack"];

    let (parser, flow) = flow_parser();
    parser.parse(&line).unwrap();
    let first = (
        flow.architecture.get(),
        flow.pack.get(),
        flow.route_chan_width.get(),
        flow.criticality_exp.get(),
    );

    let (parser, flow) = flow_parser();
    parser.parse(&line).unwrap();
    let second = (
        flow.architecture.get(),
        flow.pack.get(),
        flow.route_chan_width.get(),
        flow.criticality_exp.get(),
    );

    assert_eq!(first, second);
}

#[test]
fn one_parser_serves_many_sequential_parses() {
    let (parser, flow) = flow_parser();

    parser
        .parse(&["a.xml", "a.blif", "--route_chan_width", "300"])
        .unwrap();
    assert_eq!(flow.route_chan_width.get(), 300);

    // the second parse re-applies the default over the previous binding
    parser.parse(&["b.xml", "b.blif"]).unwrap();
    assert_eq!(flow.route_chan_width.get(), 100);
    assert_eq!(flow.architecture.get(), "b.xml");
}

#[test]
fn attached_values_parse_like_separated_ones() {
    let (parser, flow) = flow_parser();
    parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--route_chan_width=300"])
        .unwrap();
    assert_eq!(flow.route_chan_width.get(), 300);
}

#[test]
fn a_flag_given_an_attached_value_is_an_arity_error() {
    let (parser, _flow) = flow_parser();
    let err = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--pack=on"])
        .unwrap_err();
    assert_eq!(
        err,
        ArgsError::ArityMismatch {
            name: "--pack".to_string(),
            expected: 0,
            found: 1,
        }
    );
}

#[test]
fn reports_serialize_for_consumers() {
    let (parser, _flow) = flow_parser();
    let report = parser
        .parse(&["my_arch.xml", "my_circuit.blif", "--pack"])
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("--pack"));
    assert!(json.contains("architecture"));
}

#[test]
fn required_options_fail_when_never_matched() {
    let mut parser = ArgParser::new("demo");
    let blif = ArgRef::new(String::new());
    parser
        .register(
            ArgSpec::option("--blif_file", &blif, StringConvert)
                .required(true)
                .help("Technology-mapped circuit"),
        )
        .unwrap();

    let err = parser.parse::<&str>(&[]).unwrap_err();
    assert_eq!(err, ArgsError::MissingArgument("--blif_file".to_string()));

    parser.parse(&["--blif_file", "c.blif"]).unwrap();
    assert_eq!(blif.get(), "c.blif");
}

#[test]
fn fixed_arity_options_bind_vectors() {
    let mut parser = ArgParser::new("demo");
    let window: ArgRef<Vec<i64>> = ArgRef::new(Vec::new());
    parser
        .register(
            ArgSpec::list("--window", 4, &window, IntConvert).help("Placement window (x1 y1 x2 y2)"),
        )
        .unwrap();

    parser.parse(&["--window", "0", "0", "10", "12"]).unwrap();
    assert_eq!(window.get(), vec![0, 0, 10, 12]);

    let err = parser.parse(&["--window", "0", "0"]).unwrap_err();
    assert_eq!(
        err,
        ArgsError::ArityMismatch {
            name: "--window".to_string(),
            expected: 4,
            found: 2,
        }
    );
}

#[test]
fn defaulted_positionals_may_be_omitted() {
    let mut parser = ArgParser::new("demo");
    let circuit = ArgRef::new(String::new());
    let outfile = ArgRef::new(String::new());
    parser
        .register(ArgSpec::positional("circuit", &circuit, StringConvert))
        .unwrap();
    parser
        .register(
            ArgSpec::positional("outfile", &outfile, StringConvert).default_value("out.blif"),
        )
        .unwrap();

    let report = parser.parse(&["my_circuit.blif"]).unwrap();
    assert_eq!(circuit.get(), "my_circuit.blif");
    assert_eq!(outfile.get(), "out.blif");
    assert!(!report.supplied("outfile"));
}
