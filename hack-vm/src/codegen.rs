//! Code generator: the sole stateful component of the translator. Owns the
//! label counter, the current-function context (scopes `label`/`goto`/
//! `if-goto`), and the current-file context (scopes `static` variables).
use std::io;

use crate::{error::Error, insn::InsnKind, labels::LabelMint, segment::Segment, Instruction};

struct GeneratorContext<'s> {
    labels: LabelMint,
    current_file: Option<&'s str>,
    current_function: Option<&'s str>,
    // Debug-only cross-check of spec.md §8 invariant 2: every generated
    // label within a translation unit is pairwise distinct.
    #[cfg(debug_assertions)]
    emitted_labels: rustc_hash::FxHashSet<String>,
}

pub struct CodeGenerator<'s, W: io::Write> {
    w: &'s mut W,
    ctx: GeneratorContext<'s>,
}

impl<'s, W: io::Write> CodeGenerator<'s, W> {
    pub fn new(writer: &'s mut W) -> Self {
        let ctx = GeneratorContext {
            labels: LabelMint::new(),
            current_file: None,
            current_function: None,
            #[cfg(debug_assertions)]
            emitted_labels: rustc_hash::FxHashSet::default(),
        };

        CodeGenerator { w: writer, ctx }
    }

    /// Writes a label definition `(name)`, debug-asserting it has not
    /// already been emitted in this unit.
    fn define_label(&mut self, name: &str) -> Result<(), Error> {
        #[cfg(debug_assertions)]
        debug_assert!(
            self.ctx.emitted_labels.insert(name.to_string()),
            "label {name} emitted more than once in this unit"
        );

        writeln!(self.w, "({name})")?;
        Ok(())
    }

    /// Translates every file in `sources` (in the order given — the caller
    /// is responsible for sorting directory-mode input, spec.md §5) into
    /// assembly, optionally preceded by the bootstrap sequence, and always
    /// followed by the termination tail.
    pub fn translate_unit(
        &mut self,
        sources: &[(&'s str, Vec<Instruction<'s>>)],
        bootstrap: bool,
    ) -> Result<(), Error> {
        if bootstrap {
            self.emit_bootstrap()?;
        }

        for (name, instructions) in sources {
            self.ctx.current_file = Some(name);

            for insn in instructions {
                self.emit(insn)?;
            }
        }

        self.emit_tail(bootstrap)?;
        self.w.flush()?;

        Ok(())
    }

    fn emit(&mut self, insn: &Instruction<'s>) -> Result<(), Error> {
        use InsnKind::*;

        #[cfg(debug_assertions)]
        writeln!(self.w, "// {}", insn.lexeme)?;

        match insn.kind {
            Add => self.add()?,
            Sub => self.sub()?,
            And => self.and()?,
            Or => self.or()?,
            Neg => self.neg()?,
            Not => self.not()?,
            Eq => self.compare("EQ", "JEQ")?,
            Gt => self.compare("GT", "JGT")?,
            Lt => self.compare("LT", "JLT")?,
            Push(segment, index) => self.push(segment, index)?,
            Pop(segment, index) => self.pop(segment, index)?,
            Label(label) => {
                let scoped = self.scoped_label(label);
                self.define_label(&scoped)?
            }
            Goto(label) => self.goto(&self.scoped_label(label))?,
            IfGoto(label) => self.if_goto(&self.scoped_label(label))?,
            DefFn(name, n_locals) => self.define_fn(name, n_locals)?,
            CallFn(name, n_args) => self.call_fn(name, n_args)?,
            Return => self.ret_fn()?,
        };

        Ok(())
    }

    /// Emits the fixed bootstrap sequence: `SP = 256; call Sys.init 0`.
    fn emit_bootstrap(&mut self) -> Result<(), Error> {
        writeln!(self.w, "@256\nD=A\n@SP\nM=D")?;
        self.call_fn("Sys.init", 0)?;
        Ok(())
    }

    /// Emits the terminating self-jump every generated file ends with, so
    /// the CPU halts instead of executing unmapped memory (spec.md §4.7).
    fn emit_tail(&mut self, bootstrap: bool) -> Result<(), Error> {
        let label = if bootstrap { "INFINITE_LOOP" } else { "END" };
        self.define_label(label)?;
        writeln!(self.w, "@{label}\n0;JMP")?;
        Ok(())
    }

    /// Construct the symbol of a static variable from the current file and
    /// given index (spec.md §4.3 / §6 static-variable naming contract).
    fn static_variable(&self, index: u16) -> Result<String, Error> {
        let file_name = self.ctx.current_file.ok_or(Error::NoCurrentFile)?;
        Ok(format!("{file_name}.{index}"))
    }

    /// Scopes `label`/`goto`/`if-goto` targets to the current function
    /// (spec.md §4.4): `F$L` while inside `F`, bare `L` otherwise. A name
    /// that already contains a dot is treated as a fully qualified function
    /// name and passed through unchanged — the mechanism `call` relies on
    /// to transfer control via an ordinary `goto` (spec.md §4.4, open
    /// question 2: VM source is assumed never to produce a dotted label).
    fn scoped_label(&self, label: &str) -> String {
        if label.contains('.') {
            return label.to_string();
        }

        match self.ctx.current_function {
            Some(f) => format!("{f}${label}"),
            None => label.to_string(),
        }
    }

    /// Push the given value to the top of the stack.
    fn push(&mut self, segment: Segment, index: u16) -> Result<(), Error> {
        use Segment::*;

        match segment {
            Constant => writeln!(self.w, "@{index}\nD=A\n{PUSH}")?,
            Static => writeln!(self.w, "@{}\nD=M\n{PUSH}", self.static_variable(index)?)?,
            _ => {
                let src = self.address(segment, index)?;
                writeln!(self.w, "{src}\nD=M\n{PUSH}")?;
            }
        };
        Ok(())
    }

    /// Resolves the effective address of `segment[index]` into the A
    /// register. For base-pointer segments this loads `base + index`;
    /// `pop` needs this computed before the stack is touched, since
    /// decrementing `SP` and dereferencing both clobber `A`/`D` (spec.md
    /// §4.3).
    fn address(&self, segment: Segment, index: u16) -> Result<String, Error> {
        use Segment::*;

        let align_offset = |base: &str, offset: u16| {
            let increment = "A=A+1\n".repeat(offset as usize);
            format!("@{base}\nA=M\n{increment}")
        };

        let dest = match segment {
            Local => align_offset("LCL", index),
            Argument => align_offset("ARG", index),
            Static => format!("@{}", self.static_variable(index)?),
            This => align_offset("THIS", index),
            That => align_offset("THAT", index),
            Pointer if index == 0 => "@THIS".into(),
            Pointer => "@THAT".into(),
            Temp => format!("@R{}", index + 5),
            Constant => return Err(Error::PopIntoConstant),
        };

        Ok(dest)
    }

    /// Pop the value on top of the stack and store it into `segment[index]`.
    /// The target address is resolved into `R13` first (see [`address`])
    /// before the pop clobbers `A`/`D`.
    fn pop(&mut self, segment: Segment, index: u16) -> Result<(), Error> {
        let dest = self.address(segment, index)?;
        writeln!(self.w, "{dest}\nD=A\n@R13\nM=D\n{POP}\n@R13\nA=M\nM=D")?;
        Ok(())
    }

    /// Defines the function: emits its label and pushes `n_locals` zeros to
    /// initialize the local segment (spec.md §4.5).
    fn define_fn(&mut self, name: &'s str, n_locals: u16) -> Result<(), Error> {
        self.ctx.current_function = Some(name);

        self.define_label(name)?;
        for _ in 0..n_locals {
            writeln!(self.w, "D=0\n{PUSH}")?;
        }
        Ok(())
    }

    /// Implements the calling convention: save the caller's frame, set up
    /// the callee's frame, transfer control (spec.md §4.5).
    fn call_fn(&mut self, name: &'s str, n_args: u16) -> Result<(), Error> {
        let n = self.ctx.labels.next();
        let ret_label = format!("RETURN_{name}_{n}");

        writeln!(self.w, "@{ret_label}\nD=A\n{PUSH}")?;
        for base in ["LCL", "ARG", "THIS", "THAT"] {
            writeln!(self.w, "@{base}\nD=M\n{PUSH}")?;
        }

        // ARG = SP - n_args - 5
        writeln!(
            self.w,
            "@{}\nD=A\n@SP\nD=M-D\n@ARG\nM=D",
            n_args as u32 + 5
        )?;
        // LCL = SP
        writeln!(self.w, "@SP\nD=M\n@LCL\nM=D")?;

        self.goto(name)?;
        self.define_label(&ret_label)?;

        Ok(())
    }

    /// Implements `return` (spec.md §4.5): saves `endFrame`/`returnAddr`
    /// into scratch `R13`/`R14` before the stack area they came from is
    /// overwritten, places the return value at `*ARG`, repositions `SP`,
    /// restores the caller's saved segments, and jumps to `R14`.
    fn ret_fn(&mut self) -> Result<(), Error> {
        writeln!(self.w, "{RET}")?;
        Ok(())
    }

    fn add(&mut self) -> Result<(), Error> {
        self.binary_calc("+")
    }

    fn sub(&mut self) -> Result<(), Error> {
        // top-of-stack is the subtrahend: result = second-to-top - top
        self.binary_calc("-")
    }

    fn and(&mut self) -> Result<(), Error> {
        self.binary_calc("&")
    }

    fn or(&mut self) -> Result<(), Error> {
        self.binary_calc("|")
    }

    fn neg(&mut self) -> Result<(), Error> {
        self.unary_calc("-")
    }

    fn not(&mut self) -> Result<(), Error> {
        self.unary_calc("!")
    }

    fn goto(&mut self, label: &str) -> Result<(), Error> {
        writeln!(self.w, "@{label}\n0;JMP")?;
        Ok(())
    }

    /// Pop the top of the stack, and if it is non-zero jump to `label`.
    fn if_goto(&mut self, label: &str) -> Result<(), Error> {
        writeln!(self.w, "{POP}\n@{label}\nD;JNE")?;
        Ok(())
    }

    /// Applies `operand` to the top two stack values and pushes the result.
    /// Actually only pops the top value and replaces the new top in place,
    /// which has the same observable effect and avoids a redundant push.
    fn binary_calc(&mut self, operand: &str) -> Result<(), Error> {
        writeln!(self.w, "{POP}\n@SP\nA=M-1\nM=M{operand}D")?;
        Ok(())
    }

    /// Applies `operand` to the value on top of the stack in place.
    fn unary_calc(&mut self, operand: &str) -> Result<(), Error> {
        writeln!(self.w, "@SP\nA=M-1\nM={operand}M")?;
        Ok(())
    }

    /// Computes `x - y` (`x` second-to-top, `y` top) and branches on
    /// `jump`, pushing `-1` (true) or `0` (false). Mints two fresh labels,
    /// `{op}_TRUE_{n}` / `{op}_END_{n}` (spec.md §4.2).
    fn compare(&mut self, op: &str, jump: &str) -> Result<(), Error> {
        let n = self.ctx.labels.next();
        let true_label = format!("{op}_TRUE_{n}");
        let end_label = format!("{op}_END_{n}");

        writeln!(
            self.w,
            "\
{POP}
@SP
A=M-1
D=M-D
@{true_label}
D;{jump}
@SP
A=M-1
M=0
@{end_label}
0;JMP"
        )?;
        self.define_label(&true_label)?;
        writeln!(self.w, "@SP\nA=M-1\nM=-1")?;
        self.define_label(&end_label)?;
        Ok(())
    }
}

/// Push the value in the D register to the top of the stack.
const PUSH: &str = "\
@SP
A=M
M=D
@SP
M=M+1";

/// Pop the top of the stack into the D register.
const POP: &str = "\
@SP
AM=M-1
D=M";

/// `return`: R13 holds `endFrame` (= LCL at entry), R14 holds the saved
/// return address, computed before the stack area is overwritten.
const RET: &str = "\
@LCL
D=M
@R13
M=D
@5
A=D-A
D=M
@R14
M=D
@SP
A=M-1
D=M
@ARG
A=M
M=D
@ARG
D=M+1
@SP
M=D
@R13
A=M-1
D=M
@THAT
M=D
@2
D=A
@R13
A=M-D
D=M
@THIS
M=D
@3
D=A
@R13
A=M-D
D=M
@ARG
M=D
@4
D=A
@R13
A=M-D
D=M
@LCL
M=D
@R14
A=M
0;JMP";
