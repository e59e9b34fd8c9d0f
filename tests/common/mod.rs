//! Minimal Hack CPU used to execute translator output in tests.

#![allow(dead_code)]

use std::collections::HashMap;

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;

enum Instruction {
    Address(u16),
    Compute {
        dest: String,
        comp: String,
        jump: String,
    },
}

pub struct Hack {
    rom: Vec<Instruction>,
    halt: Option<usize>,
    pub ram: Vec<i16>,
    a: i16,
    d: i16,
    pc: usize,
}

fn predefined(symbol: &str) -> Option<u16> {
    match symbol {
        "SP" => Some(0),
        "LCL" => Some(1),
        "ARG" => Some(2),
        "THIS" => Some(3),
        "THAT" => Some(4),
        "SCREEN" => Some(16384),
        "KBD" => Some(24576),
        _ => symbol
            .strip_prefix('R')
            .and_then(|n| n.parse::<u16>().ok())
            .filter(|n| *n < 16),
    }
}

impl Hack {
    /// Assemble `asm` into ROM. Panics on malformed input.
    pub fn load(asm: &str) -> Self {
        let lines: Vec<&str> = asm
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut labels = HashMap::new();
        let mut pc = 0;
        for line in &lines {
            if let Some(label) = line.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
                assert!(
                    labels.insert(label.to_string(), pc).is_none(),
                    "duplicate label {label}"
                );
            } else {
                pc += 1;
            }
        }

        let mut variables: HashMap<String, u16> = HashMap::new();
        let mut next_variable = 16;
        let mut rom = Vec::new();
        for line in &lines {
            if line.starts_with('(') {
                continue;
            }
            if let Some(symbol) = line.strip_prefix('@') {
                let value = if let Ok(n) = symbol.parse::<u16>() {
                    n
                } else if let Some(n) = predefined(symbol) {
                    n
                } else if let Some(&n) = labels.get(symbol) {
                    n as u16
                } else {
                    *variables.entry(symbol.to_string()).or_insert_with(|| {
                        let n = next_variable;
                        next_variable += 1;
                        n
                    })
                };
                rom.push(Instruction::Address(value));
            } else {
                let (dest, rest) = match line.split_once('=') {
                    Some((dest, rest)) => (dest, rest),
                    None => ("", *line),
                };
                let (comp, jump) = rest.split_once(';').unwrap_or((rest, ""));
                rom.push(Instruction::Compute {
                    dest: dest.to_string(),
                    comp: comp.to_string(),
                    jump: jump.to_string(),
                });
            }
        }

        Self {
            rom,
            halt: labels.get("END").copied(),
            ram: vec![0; 32768],
            a: 0,
            d: 0,
            pc: 0,
        }
    }

    pub fn set_stack(&mut self, sp: i16) {
        self.ram[SP] = sp;
    }

    pub fn sp(&self) -> i16 {
        self.ram[SP]
    }

    /// Value just below the stack pointer.
    pub fn top(&self) -> i16 {
        self.ram[self.ram[SP] as usize - 1]
    }

    fn eval(&self, comp: &str) -> i16 {
        let m = self.ram[self.a as u16 as usize];
        let operand = |c: char| match c {
            'A' => self.a,
            'D' => self.d,
            'M' => m,
            '0' => 0,
            '1' => 1,
            _ => panic!("bad operand in {comp}"),
        };
        let chars: Vec<char> = comp.chars().collect();
        match chars.as_slice() {
            [x] => operand(*x),
            ['-', x] => operand(*x).wrapping_neg(),
            ['!', x] => !operand(*x),
            [x, '+', y] => operand(*x).wrapping_add(operand(*y)),
            [x, '-', y] => operand(*x).wrapping_sub(operand(*y)),
            [x, '&', y] => operand(*x) & operand(*y),
            [x, '|', y] => operand(*x) | operand(*y),
            _ => panic!("unsupported comp {comp}"),
        }
    }

    /// Run until the halt loop is reached. Panics after `max_steps`.
    pub fn run(&mut self, max_steps: usize) {
        for _ in 0..max_steps {
            if Some(self.pc) == self.halt || self.pc >= self.rom.len() {
                return;
            }
            match &self.rom[self.pc] {
                Instruction::Address(value) => {
                    self.a = *value as i16;
                    self.pc += 1;
                }
                Instruction::Compute { dest, comp, jump } => {
                    let value = self.eval(comp);
                    let address = self.a as u16 as usize;
                    if dest.contains('M') {
                        self.ram[address] = value;
                    }
                    if dest.contains('A') {
                        self.a = value;
                    }
                    if dest.contains('D') {
                        self.d = value;
                    }
                    let taken = match jump.as_str() {
                        "" => false,
                        "JGT" => value > 0,
                        "JEQ" => value == 0,
                        "JGE" => value >= 0,
                        "JLT" => value < 0,
                        "JNE" => value != 0,
                        "JLE" => value <= 0,
                        "JMP" => true,
                        other => panic!("unsupported jump {other}"),
                    };
                    self.pc = if taken { self.a as u16 as usize } else { self.pc + 1 };
                }
            }
        }
        panic!("program did not halt within {max_steps} steps");
    }
}
