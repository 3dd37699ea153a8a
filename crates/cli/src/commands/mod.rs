pub mod migrate;
pub mod resolve;
pub mod statistics;

use metricvar_core::MetricFindValue;

/// One option per line: the value, followed by the label when it differs.
pub fn print_options(options: &[MetricFindValue]) {
    for line in options.iter().map(option_line) {
        println!("{line}");
    }
}

fn option_line(option: &MetricFindValue) -> String {
    if option.text == option.value {
        option.value.clone()
    } else {
        format!("{}\t{}", option.value, option.text)
    }
}
