#[macro_export]
macro_rules! err {
    ($($args:tt)*) => {
        Into::<anyhow::Error>::into(anyhow::anyhow!($($args)*))
    };
}

#[macro_export]
macro_rules! err_file_open {
    ($path:expr) => {
        $crate::err!("failed to open file: {}", $path.display())
    };
}

#[macro_export]
macro_rules! err_digest_mismatch {
    ($policy:expr, $index:expr, $want:expr, $got:expr) => {
        $crate::err!(
            "{}: wrong digest at index {} (expected {}, got {})",
            $policy,
            $index,
            hashbench_utils::hash::to_hex($want),
            hashbench_utils::hash::to_hex($got),
        )
    };
}

#[macro_export]
macro_rules! err_slot_state {
    ($policy:expr, $index:expr, $filled:expr) => {
        $crate::err!(
            "{}: output slot {} is {}",
            $policy,
            $index,
            if $filled { "filled but should be empty" } else { "empty" }
        )
    };
}
