/// Per-position classification of the target passage against the typed
/// buffer. Derived state, recomputed in full on every input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    /// Not reached yet.
    Untyped,
    /// Typed and matches the target.
    Correct,
    /// Typed and differs from the target.
    Incorrect,
    /// The next character the user is expected to type.
    Current,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub states: Vec<CharState>,
    pub error_count: usize,
}

/// Classifies every target position against the typed buffer.
///
/// Pure function of its inputs: full O(target) recomputation per call, no
/// incremental patching of earlier results. Comparison is exact code-point
/// equality with no normalization or case folding. Typed characters past
/// the end of the target are ignored; they contribute neither a state nor
/// an error.
///
/// Exactly one position is `Current` (the first untyped one) while typed
/// input is shorter than the target; none once it is the same length or
/// longer.
pub fn classify(target: &[char], typed: &[char]) -> Classification {
    let mut states = Vec::with_capacity(target.len());
    let mut error_count = 0;

    for (i, &expected) in target.iter().enumerate() {
        let state = match typed.get(i) {
            None if i == typed.len() => CharState::Current,
            None => CharState::Untyped,
            Some(&c) if c == expected => CharState::Correct,
            Some(_) => {
                error_count += 1;
                CharState::Incorrect
            }
        };
        states.push(state);
    }

    Classification {
        states,
        error_count,
    }
}
