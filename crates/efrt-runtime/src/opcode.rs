//! Instruction set and byte decoding
//!
//! Every byte is a valid instruction. The handful of bytes listed in
//! [`Opcode`] are operators; every other byte pushes its own numeric value.
//!
//! Decoding uses a static 256-entry lookup table indexed by the raw byte, so
//! the interpreter loop never walks a match chain on the hot path.

/// A decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // ===== Arithmetic =====
    /// `+` a + b
    Add,
    /// `-` a - b
    Sub,
    /// `*` a * b
    Mul,
    /// `/` a / b with zero-divisor fallbacks
    Div,
    /// `%` IEEE remainder of a / b
    Rem,
    /// `^` a raised to b
    Pow,

    // ===== Comparison =====
    /// `=` 1 if a == b
    Equal,
    /// `>` 1 if a > b
    Greater,
    /// `<` 1 if a < b
    Less,

    // ===== Pure unary / stack =====
    /// `d` duplicate the top cell
    Dup,
    /// `t` swap the two top values
    Swap,
    /// `a` absolute value
    Abs,
    /// `s` sign
    Sign,
    /// `r` square root
    Sqrt,
    /// `l` base-10 logarithm
    Log10,
    /// `f` floor
    Floor,
    /// `c` ceiling
    Ceil,

    // ===== Console and environment =====
    /// `C` write one character
    PutChar,
    /// `N` write a number and a line break
    PutNumber,
    /// `D` read one input byte
    GetByte,
    /// `O` read one input line as a number
    GetNumber,
    /// `R` uniform random value in [0, 1)
    Random,
    /// `T` Unix time in seconds
    Time,

    // ===== Control flow and memory =====
    /// `J` relative, wrapping jump
    Jump,
    /// `S` heap store
    Store,
    /// `L` heap load
    Load,

    /// `\n` and `\r` do nothing
    Nop,
    /// Any other byte pushes its value
    Literal(u8),
}

/// Static dispatch table mapping byte values to Opcodes.
/// Indexed by the raw byte for O(1) lookup.
static OPCODE_TABLE: [Opcode; 256] = {
    let mut table = [Opcode::Nop; 256];

    let mut byte = 0;
    while byte < 256 {
        table[byte] = Opcode::Literal(byte as u8);
        byte += 1;
    }

    // Arithmetic
    table[b'+' as usize] = Opcode::Add;
    table[b'-' as usize] = Opcode::Sub;
    table[b'*' as usize] = Opcode::Mul;
    table[b'/' as usize] = Opcode::Div;
    table[b'%' as usize] = Opcode::Rem;
    table[b'^' as usize] = Opcode::Pow;

    // Comparison
    table[b'=' as usize] = Opcode::Equal;
    table[b'>' as usize] = Opcode::Greater;
    table[b'<' as usize] = Opcode::Less;

    // Pure operators
    table[b'd' as usize] = Opcode::Dup;
    table[b't' as usize] = Opcode::Swap;
    table[b'a' as usize] = Opcode::Abs;
    table[b's' as usize] = Opcode::Sign;
    table[b'r' as usize] = Opcode::Sqrt;
    table[b'l' as usize] = Opcode::Log10;
    table[b'f' as usize] = Opcode::Floor;
    table[b'c' as usize] = Opcode::Ceil;

    // Impure operators
    table[b'C' as usize] = Opcode::PutChar;
    table[b'N' as usize] = Opcode::PutNumber;
    table[b'D' as usize] = Opcode::GetByte;
    table[b'O' as usize] = Opcode::GetNumber;
    table[b'R' as usize] = Opcode::Random;
    table[b'T' as usize] = Opcode::Time;
    table[b'J' as usize] = Opcode::Jump;
    table[b'S' as usize] = Opcode::Store;
    table[b'L' as usize] = Opcode::Load;

    // Line breaks
    table[b'\n' as usize] = Opcode::Nop;
    table[b'\r' as usize] = Opcode::Nop;

    table
};

impl Opcode {
    /// Decode a program byte
    #[inline(always)]
    pub fn decode(byte: u8) -> Opcode {
        OPCODE_TABLE[byte as usize]
    }
}
