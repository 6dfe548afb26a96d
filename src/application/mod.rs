// ============================================================
// Layer 2 — Application Layer (Use Cases)
// ============================================================
// One use case per CLI subcommand. Each owns a plain config
// struct (no clap types) and orchestrates the layers below:
//
//   index_use_case.rs — scan the image tree, persist the label
//                       index manifest and the partition summary
//   warm_use_case.rs  — scan, then fill the bottleneck cache for
//                       every (label, category, index) triple
//   fetch_use_case.rs — make sure the pretrained model bundle is
//                       downloaded and extracted

pub mod index_use_case;
pub mod warm_use_case;
pub mod fetch_use_case;
