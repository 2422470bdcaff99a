cfg_if::cfg_if! {
    if #[cfg(target_feature="sse2")] {
        mod sse2;
        pub use sse2::*;
    } else {
        mod fallback;
        pub use fallback::*;
    }
}
