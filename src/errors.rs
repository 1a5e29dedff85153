pub use anyhow::{Context, Error, Result};

#[macro_export]
macro_rules! debjdk_info {
    ($e:expr) => {
        {
            use ansi_term::Colour::Green;
            println!("{}", Green.paint($e));
        }
    };

    ($fmt:expr, $( $arg:tt)+) => {
        {
            use ansi_term::Colour::Green;
            let print_string = format!($fmt, $($arg)+);
            println!("{}", Green.paint(print_string));
        }
    };
}

#[macro_export]
macro_rules! debjdk_warn {
    ($e:expr) => {
        {
            use ansi_term::Colour::RGB;
            println!("{}", RGB(255, 165, 0).bold().paint($e));
        }
    };

    ($fmt:expr, $( $arg:tt)+) => {
        {
            use ansi_term::Colour::RGB;
            let print_string = format!($fmt, $($arg)+);
            println!("{}", RGB(255, 165, 0).bold().paint(print_string));
        }
    };
}

#[macro_export]
macro_rules! debjdk_bail {
    ($e:expr) => {{
        use ansi_term::Colour::Red;
        return Err(::anyhow::anyhow!(Red.bold().paint($e).to_string()));
    }};

    ($fmt:expr, $( $arg:tt)+) => {
        {
            use ansi_term::Colour::Red;
            let error_string = format!($fmt, $($arg)+);
            return Err(::anyhow::anyhow!(Red.bold().paint(error_string).to_string()));
        }
    };
}
