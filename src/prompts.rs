//! Fixed prompts sent alongside the caller's photo.

/// Asks the model to render the same face with an idealized smile.
pub const IMAGE_TRANSFORMATION: &str = "Create a realistic dental transformation of this smile showing: \
perfectly straight and aligned teeth, professionally whitened teeth (bright white but natural-looking), \
no gaps, no cavities, a symmetrical smile, and healthy pink gums. \
Keep the person's natural facial structure identical. \
Make it look like a professional, realistic cosmetic dentistry result.";

/// Asks the model for a treatment plan in a fixed four-section layout.
pub const ANALYSIS: &str = "Analyze this dental smile photo and provide a concise treatment plan in this EXACT format:

**Current Concerns:**
• [List 2-3 main issues]

**Recommended Treatments:**
• [Treatment 1] - [One sentence description]
• [Treatment 2] - [One sentence description]

**Timeline:**
• Estimated duration: [X-X months]

**Expected Results:**
• [2-3 sentences describing the final outcome]";
