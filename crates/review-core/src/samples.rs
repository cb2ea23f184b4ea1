//! Sample programs with deliberate issues, used to demo the analyzer

use crate::types::{Language, SampleSnippet};

const PYTHON_SAMPLE: &str = r#"import os
import sys

# This function has several issues
def calculate_average(numbers):
    unused_var = "This variable is never used"
    total = 0
    count = 0

    for num in numbers:
        total += num
        count += 1

    # Potential division by zero
    return total / count

# Missing function documentation
def process_data(data):
    result = []
    for item in data:
        if item > 0:
            result.append(item * 2)
    return result

# Main execution
if __name__ == "__main__":
    test_numbers = [1, 2, 3, 4, 5]
    avg = calculate_average(test_numbers)
    print(f"Average: {avg}")"#;

const JAVASCRIPT_SAMPLE: &str = r#"// JavaScript code with various issues
var unusedVariable = "This variable is never used";
let duplicateVar = 1;

function calculateTotal(items) {
    var sum = 0;  // Should use let/const

    for (var i = 0; i < items.length; i++) {
        sum += items[i]  // Missing semicolon
    }

    // Using == instead of ===
    if (sum == 0) {
        console.log("Total is zero");
    }

    return sum;
}

// Function with unused parameter
function processItem(item, unusedParam) {
    return item * 2;
}

// Missing const for variable that never changes
let PI_VALUE = 3.14159;

// Inconsistent quotes
let message1 = "Hello World";
let message2 = 'Hello World';

calculateTotal([1, 2, 3, 4, 5]);"#;

pub const SAMPLES: [SampleSnippet; 2] = [
    SampleSnippet {
        language: Language::Python,
        text: PYTHON_SAMPLE,
    },
    SampleSnippet {
        language: Language::JavaScript,
        text: JAVASCRIPT_SAMPLE,
    },
];

pub fn sample_for(language: Language) -> SampleSnippet {
    match language {
        Language::Python => SAMPLES[0],
        Language::JavaScript => SAMPLES[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::detect;
    use crate::types::FormState;
    use crate::validator::validate;

    #[test]
    fn test_samples_are_detected_as_their_language() {
        for sample in SAMPLES {
            assert_eq!(detect(sample.text), Some(sample.language));
        }
    }

    #[test]
    fn test_samples_pass_validation() {
        for sample in SAMPLES {
            let form = FormState::text(Some(sample.language), sample.text);
            assert!(validate(&form).ok);
        }
    }

    #[test]
    fn test_sample_for_matches_language() {
        assert_eq!(sample_for(Language::Python).language, Language::Python);
        assert_eq!(
            sample_for(Language::JavaScript).language,
            Language::JavaScript
        );
    }
}
