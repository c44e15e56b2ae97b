//! Method labels the benchmark prints for each strategy id.

/// Labels for strategy ids `0..=39`, indexed by id.
pub const STRATEGY_LABELS: [&str; 40] = [
    // baselines on already-touched memory
    "memset",
    "memset (page)",
    "for loop(float)",
    "for loop(double)",
    // allocation only
    "new<float>[]",
    "new<double>[]",
    "page_aligned",
    "malloc",
    "operator new",
    // allocation + first touch
    "new<float>[]()",
    "new<float>[]+memset",
    "new<float>[]+memset_page",
    "new<float>[]+loop_set",
    "new<double>[]()",
    "new<double>[]+memset",
    "new<double>[]+memset_page",
    "new<double>[]+loop_set",
    "page_aligned+memset",
    "page_aligned+memset_page",
    "page_aligned+loop_set(float)",
    "page_aligned+loop_set(double)",
    "malloc+memset",
    "malloc+memset_page",
    "malloc+loop_set(float)",
    "malloc+loop_set(double)",
    "malloc+mallopt+memset",
    "malloc+mallopt+memset_page",
    "malloc+mallopt+loop_set(float)",
    "malloc+mallopt+loop_set(double)",
    "operator new+memset",
    "operator new+memset_page",
    "operator new+loop_set(float)",
    "operator new+loop_set(double)",
    "calloc<float>",
    "calloc<double>",
    "mmap+memset",
    "mmap+memset_page",
    "mmap+loop_set(float)",
    "mmap+loop_set(double)",
    "mmap",
];

/// Highest strategy id the reference benchmark knows.
pub const MAX_STRATEGY_ID: u32 = STRATEGY_LABELS.len() as u32 - 1;

pub fn strategy_label(id: u32) -> &'static str {
    STRATEGY_LABELS.get(id as usize).copied().unwrap_or("unknown")
}
