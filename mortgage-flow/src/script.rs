//! Dialogue copy. Everything the bot says lives here so the machine logic
//! stays free of string literals and the wording can be reviewed in one place.

pub const GREETING_INTRO: &str = "Hi there! I'm Meghana.";
pub const GREETING_PITCH: &str = "I'm your mortgage assistant chatbot, and I'll be helping you \
     check your mortgage eligibility today. It's super simple, I'll just ask you a few quick \
     questions to get started.";
pub const GET_STARTED_LABEL: &str = "Let's get started - click here";

pub const PROPERTY_TYPE_QUESTION: &str =
    "Great! First up - what kind of property are you looking to get a mortgage for?";
pub const COMMERCIAL_HANDOFF: &str = "Thanks for letting us know! Commercial mortgages are a bit \
     more detailed, so one of our team members will be the best person to help you out. Please \
     click the button below to leave your contact information for us to reach out to you.";
pub const RESIDENTIAL_ACK: &str = "Great Choice! Let's talk more about your residential plans.";
pub const PURPOSE_QUESTION: &str =
    "So, are you planning to buy a new home or refinance your current mortgage?";
pub const LOCATION_QUESTION: &str =
    "Great! Please choose the location of the property from the list below.";

pub const LOAN_AMOUNT_QUESTION_PURCHASE: &str =
    "Awesome! How much are you looking to borrow for your purchase?";
pub const LOAN_AMOUNT_QUESTION_REFINANCE: &str =
    "Awesome! How much are you looking to borrow for your refinance?";
pub const PROPERTY_VALUE_QUESTION_PURCHASE: &str =
    "Nice! What's the estimated value of the property you are looking to buy?";
pub const PROPERTY_VALUE_QUESTION_REFINANCE: &str =
    "Nice! What's the estimated value of your current property?";

pub const DEPOSIT_DECISION_QUESTION: &str =
    "Almost there! Would you be okay to put a deposit on the property you're buying?";
pub const DEPOSIT_AMOUNT_QUESTION: &str =
    "Great! How much are you thinking of putting down for the deposit?";
pub const COLLATERAL_DECISION_QUESTION: &str =
    "No worries! Do you have any collateral you can offer instead?";
pub const COLLATERAL_VALUE_QUESTION: &str =
    "Perfect! What's the estimated value of the collateral you're offering?";
pub const EXISTING_MORTGAGE_DECISION_QUESTION: &str =
    "Almost there! Do you have any existing mortgages on this property?";
pub const EXISTING_MORTGAGE_AMOUNT_QUESTION: &str =
    "Got it! What's the total estimated outstanding amount on your current mortgages?";

pub const ELIGIBLE_CONGRATS: &str = "Congratulations! Based on the information you provided, you \
     appear to be eligible for a mortgage loan.";
pub const ELIGIBLE_NEXT_STEPS: &str = "If you'd like, please click the button below to connect \
     with one of our representatives who can help you take the next steps and answer any \
     questions you may have.";
pub const ELIGIBLE_NEXT_STEPS_LOW: &str = "If you'd like, please click the button below to \
     connect with our team to help you take the next steps and answer any questions you may have.";
pub const HIGH_LTV_QUESTION: &str = "Based on the information provided, your LTV ratio is quite \
     high. Do you have another property you can use as collateral?";
pub const HIGH_LTV_YES: &str = "That's great! We'd be happy to connect with you. Please leave us \
     a message with your contact information by clicking the button below, and one of our \
     representatives will reach out to discuss your eligibility and walk you through the next \
     steps.";
pub const HIGH_LTV_NO: &str = "Thanks for sharing these details! While it looks like you might \
     not meet all the criteria for a mortgage right now, don't worry - our team is here to help \
     you explore other options or offer guidance on how to improve your eligibility. Please \
     click the button below to get in touch with our team.";
pub const NOT_ELIGIBLE: &str = "Thanks for sharing these details! While it looks like you might \
     not meet the current eligibility criteria just yet, there are often other paths we can \
     explore. Our team would love to help you figure out the next best step! Please click the \
     button below to get in touch with our team.";

pub const CHECK_ANOTHER_QUESTION: &str =
    "Would you like to check eligibility for another property?";
pub const GOODBYE_MESSAGE: &str = "Great helping you out today! If you have any more questions, \
     I'm always here to help. Or, you could leave your contact information by clicking the \
     button below and one of our representatives will reach out to you.";

pub const PRESS_START: &str = "Please click the button to get started.";
pub const INVALID_OPTION: &str = "Please select an option.";
pub const INVALID_YES_NO: &str = "Please select Yes or No.";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount (numbers only).";
pub const INVALID_LOCATION: &str = "Please choose a location from the list.";
pub const END_REPROMPT: &str = "Please click the button above to give your contact information!";

/// Identifier of the only external action the machine requests: opening the
/// contact channel. The owning application maps it to the real mechanism.
pub const CONTACT_ACTION_ID: &str = "open_contact_form";
pub const CONTACT_LABEL_COMMERCIAL: &str = "Leave us a message";
pub const CONTACT_LABEL_TEAM: &str = "Get in touch with our team";
pub const CONTACT_LABEL_CONNECT: &str = "Yes, please connect me!";
pub const CONTACT_LABEL_GOODBYE: &str = "Get in Touch";
