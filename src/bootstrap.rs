//! Fixed program prologue and epilogue.

/// Label of the halt loop that ends every program.
pub const HALT_LABEL: &str = "END";

/// Base addresses written by [`generate_init`], as `(register, address)`.
pub const INITIAL_BASES: [(&str, u16); 5] = [
    ("SP", 256),
    ("LCL", 300),
    ("ARG", 400),
    ("THIS", 3000),
    ("THAT", 3010),
];

/// Generate code that points SP and the segment base registers at their
/// initial addresses.
pub fn generate_init() -> String {
    let mut buf = String::with_capacity(128);
    for (register, address) in INITIAL_BASES {
        buf.push_str(&format!("@{address}\nD=A\n@{register}\nM=D\n"));
    }
    buf
}

/// Generate the halt block: a labelled unconditional self-jump.
pub fn generate_halt() -> String {
    format!("({HALT_LABEL})\n@{HALT_LABEL}\n0;JMP\n")
}
